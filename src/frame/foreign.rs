use crate::types::ForeignKey;

/// Append `new` to `existing`, returning the concatenated list.
pub fn append(existing: &[ForeignKey], new: ForeignKey) -> Vec<ForeignKey> {
    let mut out = Vec::with_capacity(existing.len() + 1);
    out.extend(existing.iter().cloned());
    out.push(new);
    out
}

/// Concatenate two foreign-key lists, `a` first.
pub fn concat(a: &[ForeignKey], b: &[ForeignKey]) -> Vec<ForeignKey> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend(a.iter().cloned());
    out.extend(b.iter().cloned());
    out
}
