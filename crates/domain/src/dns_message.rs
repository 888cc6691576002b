//! DNS wire format (RFC 1035 §4).
//!
//! `Message::decode` accepts anything a real stub resolver sends, including
//! compressed names and EDNS(0) OPT records in the additional section.
//! `Message::encode` compresses repeated names and refuses to produce more
//! than the classic 512-byte UDP payload unless a larger limit is asked for.

mod header;
mod name;
mod reader;
mod writer;

pub use header::{Header, HEADER_LEN};
pub use name::{Name, MAX_LABEL_LEN, MAX_NAME_LEN};

use crate::dns_record::{RecordType, ResourceRecord, ResponseCode, CLASS_IN};
use crate::errors::DomainError;

/// Payload ceiling for DNS over UDP without EDNS(0).
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Raw labels, case preserved.
    pub name: Name,

    pub record_type: RecordType,

    pub class: u16,
}

impl Question {
    pub fn new(name: impl Into<Name>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            class: CLASS_IN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Message {
    pub fn decode(buf: &[u8]) -> Result<Self, DomainError> {
        reader::decode(buf)
    }

    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        self.encode_with_limit(MAX_UDP_MESSAGE_SIZE)
    }

    pub fn encode_with_limit(&self, limit: usize) -> Result<Vec<u8>, DomainError> {
        writer::encode(self, limit)
    }

    pub fn query(id: u16, question: Question) -> Self {
        Self {
            header: Header {
                id,
                recursion_desired: true,
                ..Header::default()
            },
            questions: vec![question],
            ..Self::default()
        }
    }

    /// Skeleton answer for `query`: same ID, opcode, RD bit and first
    /// question, with QR and RA set and no records.
    pub fn response_to(query: &Message) -> Self {
        Self {
            header: Header {
                id: query.header.id,
                response: true,
                opcode: query.header.opcode,
                recursion_desired: query.header.recursion_desired,
                recursion_available: true,
                ..Header::default()
            },
            questions: query.questions.first().cloned().into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_response_code(mut self, code: ResponseCode) -> Self {
        self.header.response_code = code;
        self
    }

    pub fn with_answer(mut self, record: ResourceRecord) -> Self {
        self.answers.push(record);
        self
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }
}
