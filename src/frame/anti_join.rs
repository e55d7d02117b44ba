use std::collections::HashSet;

use crate::types::Feature;

/// Items whose `id` is not present in `matched`, in source order.
pub fn by_id<'a>(items: &'a [Feature], matched: &HashSet<&str>) -> Vec<&'a Feature> {
    items.iter().filter(|item| !matched.contains(item.id.as_str())).collect()
}
