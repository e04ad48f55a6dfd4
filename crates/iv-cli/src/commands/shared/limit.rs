/// Cap a fetched list at the `--limit` flag, if one was given.
pub fn apply_limit<T>(mut items: Vec<T>, limit: Option<u32>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::apply_limit;

    #[test]
    fn no_limit_keeps_everything() {
        assert_eq!(apply_limit(vec![1, 2, 3], None), vec![1, 2, 3]);
    }

    #[test]
    fn limit_truncates() {
        assert_eq!(apply_limit(vec![1, 2, 3], Some(2)), vec![1, 2]);
        assert!(apply_limit(vec![1, 2, 3], Some(0)).is_empty());
    }
}
