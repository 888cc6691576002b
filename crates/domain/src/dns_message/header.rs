use crate::dns_record::ResponseCode;

pub const HEADER_LEN: usize = 12;

const QR_BIT: u16 = 0x8000;
const OPCODE_MASK: u16 = 0x7800;
const OPCODE_SHIFT: u16 = 11;
const AA_BIT: u16 = 0x0400;
const TC_BIT: u16 = 0x0200;
const RD_BIT: u16 = 0x0100;
const RA_BIT: u16 = 0x0080;
const Z_MASK: u16 = 0x0070;
const Z_SHIFT: u16 = 4;
const RCODE_MASK: u16 = 0x000F;

/// Fixed 12-byte message header minus the section counts, which are always
/// derived from the section vectors when encoding.
///
/// ```text
///   15  14..11  10  9   8   7   6..4  3..0
///   QR  OPCODE  AA  TC  RD  RA  Z     RCODE
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub response: bool,
    pub opcode: u8,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    /// The three reserved bits, including AD and CD. Carried through verbatim.
    pub z: u8,
    pub response_code: ResponseCode,
}

impl Header {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn from_flags(id: u16, flags: u16) -> Self {
        Self {
            id,
            response: flags & QR_BIT != 0,
            opcode: ((flags & OPCODE_MASK) >> OPCODE_SHIFT) as u8,
            authoritative: flags & AA_BIT != 0,
            truncated: flags & TC_BIT != 0,
            recursion_desired: flags & RD_BIT != 0,
            recursion_available: flags & RA_BIT != 0,
            z: ((flags & Z_MASK) >> Z_SHIFT) as u8,
            response_code: ResponseCode::from_u8((flags & RCODE_MASK) as u8),
        }
    }

    pub fn flags(&self) -> u16 {
        let mut flags = 0u16;
        if self.response {
            flags |= QR_BIT;
        }
        flags |= (u16::from(self.opcode) << OPCODE_SHIFT) & OPCODE_MASK;
        if self.authoritative {
            flags |= AA_BIT;
        }
        if self.truncated {
            flags |= TC_BIT;
        }
        if self.recursion_desired {
            flags |= RD_BIT;
        }
        if self.recursion_available {
            flags |= RA_BIT;
        }
        flags |= (u16::from(self.z) << Z_SHIFT) & Z_MASK;
        flags |= u16::from(self.response_code.to_u8()) & RCODE_MASK;
        flags
    }
}
