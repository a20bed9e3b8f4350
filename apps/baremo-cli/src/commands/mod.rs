pub mod extract;
pub mod inspect;
pub mod locate;
pub mod stats;

use baremo_core::PageRange;

/// Parse `START-END` (or a single page) into a page range
pub fn parse_page_range(s: &str) -> Result<PageRange, String> {
    let (start, end) = match s.split_once('-') {
        Some((start, end)) => (start.trim(), end.trim()),
        None => (s.trim(), s.trim()),
    };
    let start: usize = start
        .parse()
        .map_err(|_| format!("invalid start page: {:?}", start))?;
    let end: usize = end
        .parse()
        .map_err(|_| format!("invalid end page: {:?}", end))?;
    PageRange::new(start, end).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_range() {
        assert_eq!(
            parse_page_range("2649-2697").unwrap(),
            PageRange { start: 2649, end: 2697 }
        );
        assert_eq!(parse_page_range("12").unwrap(), PageRange { start: 12, end: 12 });
        assert!(parse_page_range("20-10").is_err());
        assert!(parse_page_range("0-3").is_err());
        assert!(parse_page_range("a-3").is_err());
    }
}
