/// Left-priority coalesce: `left` wins if present, otherwise `right`.
pub fn first_some<T: Clone>(left: &Option<T>, right: &Option<T>) -> Option<T> {
    left.clone().or_else(|| right.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_wins_when_present() {
        assert_eq!(first_some(&Some(1), &Some(2)), Some(1));
    }

    #[test]
    fn falls_back_to_right_when_left_absent() {
        assert_eq!(first_some(&None, &Some(2)), Some(2));
    }

    #[test]
    fn both_absent_is_none() {
        assert_eq!(first_some::<i32>(&None, &None), None);
    }
}
