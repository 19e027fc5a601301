//! # Port Space Model
//!
//! Parses a textual port specification into an ordered list of ports.
//!
//! Supported forms: a single port (`80`), a dash range (`80-443`), or a
//! comma list (`80,443,8080`). Anything malformed, reversed, or outside
//! [1, 65535] is rejected before a single probe is sent.

use crate::error::ScanError;

/// Upper bound on how many ports one scan call may cover. Larger spaces
/// are refused outright rather than silently truncated.
pub const MAX_PORT_SPACE: usize = 10_000;

/// An ordered sequence of ports in [1, 65535], ascending and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpace {
    ports: Vec<u16>,
}

impl PortSpace {
    pub fn parse(text: &str) -> Result<Self, ScanError> {
        let text = text.trim();

        let mut ports: Vec<u16> = if let Some((start_str, end_str)) = text.split_once('-') {
            let start = parse_port(start_str)?;
            let end = parse_port(end_str)?;
            if start > end {
                return Err(ScanError::InvalidPortFormat);
            }
            (start..=end).collect()
        } else if text.contains(',') {
            text.split(',')
                .map(parse_port)
                .collect::<Result<Vec<u16>, ScanError>>()?
        } else {
            vec![parse_port(text)?]
        };

        ports.sort_unstable();
        ports.dedup();
        Ok(Self { ports })
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn contains(&self, port: u16) -> bool {
        self.ports.binary_search(&port).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.ports.iter().copied()
    }
}

fn parse_port(token: &str) -> Result<u16, ScanError> {
    let value: u32 = token
        .trim()
        .parse()
        .map_err(|_| ScanError::InvalidPortFormat)?;
    if !(1..=65_535).contains(&value) {
        return Err(ScanError::InvalidPortFormat);
    }
    Ok(value as u16)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_port() {
        let space = PortSpace::parse("80").unwrap();
        assert_eq!(space.iter().collect::<Vec<u16>>(), vec![80]);
    }

    #[test]
    fn dash_range_is_inclusive() {
        let space = PortSpace::parse("80-83").unwrap();
        assert_eq!(space.iter().collect::<Vec<u16>>(), vec![80, 81, 82, 83]);
    }

    #[test]
    fn comma_list_is_sorted_and_deduplicated() {
        let space = PortSpace::parse("443, 80, 8080, 80").unwrap();
        assert_eq!(space.iter().collect::<Vec<u16>>(), vec![80, 443, 8080]);
    }

    #[test]
    fn bounds_of_the_valid_range() {
        assert!(PortSpace::parse("1").is_ok());
        assert!(PortSpace::parse("65535").is_ok());
        assert_eq!(PortSpace::parse("0"), Err(ScanError::InvalidPortFormat));
        assert_eq!(PortSpace::parse("65536"), Err(ScanError::InvalidPortFormat));
        assert_eq!(PortSpace::parse("70000"), Err(ScanError::InvalidPortFormat));
    }

    #[test]
    fn rejects_reversed_range() {
        assert_eq!(PortSpace::parse("443-80"), Err(ScanError::InvalidPortFormat));
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        assert_eq!(PortSpace::parse("ssh"), Err(ScanError::InvalidPortFormat));
        assert_eq!(
            PortSpace::parse("80,http,443"),
            Err(ScanError::InvalidPortFormat)
        );
        assert_eq!(PortSpace::parse(""), Err(ScanError::InvalidPortFormat));
        assert_eq!(PortSpace::parse("-80"), Err(ScanError::InvalidPortFormat));
    }

    #[test]
    fn out_of_range_element_fails_the_whole_spec() {
        assert_eq!(
            PortSpace::parse("80,70000"),
            Err(ScanError::InvalidPortFormat)
        );
        assert_eq!(
            PortSpace::parse("80-70000"),
            Err(ScanError::InvalidPortFormat)
        );
    }

    #[test]
    fn contains_uses_the_sorted_order() {
        let space = PortSpace::parse("22,80,443").unwrap();
        assert!(space.contains(80));
        assert!(!space.contains(8080));
    }
}
