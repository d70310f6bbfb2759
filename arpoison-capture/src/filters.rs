//! BPF filter builders

/// All ARP traffic
pub fn arp() -> String {
    "arp".to_string()
}

/// Traffic to or from a specific host
pub fn host(ip: &str) -> String {
    format!("host {}", ip)
}

/// Exclude frames sourced from a specific MAC (our own transmissions)
pub fn not_ether_src(mac: &str) -> String {
    format!("not ether src {}", mac)
}

/// Combine filters with AND logic
pub fn all(filters: &[&str]) -> String {
    filters
        .iter()
        .map(|f| format!("({})", f))
        .collect::<Vec<_>>()
        .join(" and ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_filters() {
        assert_eq!(arp(), "arp");
        assert_eq!(host("192.168.1.1"), "host 192.168.1.1");
        assert_eq!(
            not_ether_src("aa:bb:cc:dd:ee:ff"),
            "not ether src aa:bb:cc:dd:ee:ff"
        );
    }

    #[test]
    fn test_combine() {
        assert_eq!(
            all(&["arp", "not ether src aa:bb:cc:dd:ee:ff"]),
            "(arp) and (not ether src aa:bb:cc:dd:ee:ff)"
        );
    }
}
