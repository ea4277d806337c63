/// Length of the fixed Ethernet II header: two addresses and the type field.
pub const ETHERNET_HEADER_LEN: usize = 14;

/// Length of a MAC address.
pub const MAC_LEN: usize = 6;

/// Protocol value asking a packet socket for every frame regardless of
/// EtherType (`ETH_P_ALL`), in host order.
///
/// Passing the already byte-swapped `0x0300` here would be swapped a second
/// time and select protocol `0x0300` instead.
pub const ETH_P_ALL: u16 = 0x0003;

pub mod ethertype {
    pub const IPV4: u16 = 0x0800;
    pub const ARP: u16 = 0x0806;
    pub const VLAN_8021Q: u16 = 0x8100;
    pub const IPV6: u16 = 0x86DD;
    pub const MPLS_UNICAST: u16 = 0x8847;
    pub const PPPOE_SESSION: u16 = 0x8864;
    pub const QINQ_8021AD: u16 = 0x88A8;
    pub const LLDP: u16 = 0x88CC;

    /// Values up to this bound are an 802.3 payload length, not a protocol.
    pub const MAX_LENGTH: u16 = 1500;
}

/// Short name for a type/length value, used in diagnostics only.
pub fn ethertype_name(value: u16) -> &'static str {
    match value {
        0..=ethertype::MAX_LENGTH => "802.3-length",
        ethertype::IPV4 => "ipv4",
        ethertype::ARP => "arp",
        ethertype::VLAN_8021Q => "vlan",
        ethertype::IPV6 => "ipv6",
        ethertype::MPLS_UNICAST => "mpls-unicast",
        ethertype::PPPOE_SESSION => "pppoe-session",
        ethertype::QINQ_8021AD => "qinq",
        ethertype::LLDP => "lldp",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::{ETH_P_ALL, ethertype, ethertype_name};

    #[test]
    fn ethertype_names_cover_known_values() {
        assert_eq!(ethertype_name(ethertype::IPV4), "ipv4");
        assert_eq!(ethertype_name(ethertype::LLDP), "lldp");
        assert_eq!(ethertype_name(0x05dc), "802.3-length");
        assert_eq!(ethertype_name(0x1234), "unknown");
    }

    #[test]
    fn capture_all_value_is_host_order() {
        assert_eq!(ETH_P_ALL.to_be_bytes(), [0x00, 0x03]);
    }
}
