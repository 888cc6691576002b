use super::RecordType;
use crate::dns_message::Name;
use std::net::IpAddr;

/// The Internet class, the only one synthesized locally.
pub const CLASS_IN: u16 = 1;

/// A resource record from any of the answer, authority or additional sections.
///
/// RDATA is kept as the raw bytes found on the wire; nothing in the proxy
/// needs to look inside records other than the A/AAAA ones it builds itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Name,

    pub record_type: RecordType,

    pub class: u16,

    pub ttl: u32,

    pub data: Vec<u8>,
}

impl ResourceRecord {
    pub fn new(
        name: impl Into<Name>,
        record_type: RecordType,
        class: u16,
        ttl: u32,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            class,
            ttl,
            data,
        }
    }

    /// Builds an IN-class A or AAAA record depending on the address family.
    pub fn address(name: impl Into<Name>, address: IpAddr, ttl: u32) -> Self {
        let (record_type, data) = match address {
            IpAddr::V4(v4) => (RecordType::A, v4.octets().to_vec()),
            IpAddr::V6(v6) => (RecordType::AAAA, v6.octets().to_vec()),
        };
        Self::new(name, record_type, CLASS_IN, ttl, data)
    }

    /// Returns the address carried by an A/AAAA record with well-sized RDATA.
    pub fn ip_addr(&self) -> Option<IpAddr> {
        match self.record_type {
            RecordType::A => <[u8; 4]>::try_from(self.data.as_slice())
                .ok()
                .map(IpAddr::from),
            RecordType::AAAA => <[u8; 16]>::try_from(self.data.as_slice())
                .ok()
                .map(IpAddr::from),
            _ => None,
        }
    }
}
