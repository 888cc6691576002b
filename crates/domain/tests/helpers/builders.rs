#![allow(dead_code)]

/// Assembles query datagrams byte by byte, independently of the codec under
/// test, the way a stub resolver would put them on the wire.
pub struct WireQueryBuilder {
    id: u16,
    flags: u16,
    name: String,
    qtype: u16,
    qclass: u16,
    edns_payload: Option<u16>,
}

impl WireQueryBuilder {
    pub fn new() -> Self {
        Self {
            id: 0xBEEF,
            flags: 0x0100,
            name: "example.test".to_string(),
            qtype: 1,
            qclass: 1,
            edns_payload: None,
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn qtype(mut self, qtype: u16) -> Self {
        self.qtype = qtype;
        self
    }

    pub fn edns(mut self, payload_size: u16) -> Self {
        self.edns_payload = Some(payload_size);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        buf.extend_from_slice(&1u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        let arcount: u16 = if self.edns_payload.is_some() { 1 } else { 0 };
        buf.extend_from_slice(&arcount.to_be_bytes());

        push_name(&mut buf, &self.name);
        buf.extend_from_slice(&self.qtype.to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_be_bytes());

        if let Some(payload) = self.edns_payload {
            buf.push(0);
            buf.extend_from_slice(&41u16.to_be_bytes());
            buf.extend_from_slice(&payload.to_be_bytes());
            buf.extend_from_slice(&0u32.to_be_bytes());
            buf.extend_from_slice(&0u16.to_be_bytes());
        }
        buf
    }
}

impl Default for WireQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn push_name(buf: &mut Vec<u8>, name: &str) {
    for label in name.split('.').filter(|l| !l.is_empty()) {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
}
