use super::header::HEADER_LEN;
use super::name::Name;
use super::{Message, Question};
use crate::dns_record::ResourceRecord;
use crate::errors::DomainError;
use rustc_hash::FxHashMap;

/// Highest offset a 14-bit compression pointer can reach.
const MAX_POINTER_OFFSET: usize = 0x3FFF;

struct Writer {
    buf: Vec<u8>,
    suffixes: FxHashMap<Vec<Vec<u8>>, u16>,
}

impl Writer {
    fn new() -> Self {
        Self {
            buf: Vec::with_capacity(512),
            suffixes: FxHashMap::default(),
        }
    }

    fn u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn name(&mut self, name: &Name) -> Result<(), DomainError> {
        name.validate()?;
        let labels = name.labels();
        for i in 0..labels.len() {
            if let Some(&offset) = self.suffixes.get(&labels[i..]) {
                self.u16(0xC000 | offset);
                return Ok(());
            }
            if self.buf.len() <= MAX_POINTER_OFFSET {
                self.suffixes.insert(labels[i..].to_vec(), self.buf.len() as u16);
            }
            self.buf.push(labels[i].len() as u8);
            self.buf.extend_from_slice(&labels[i]);
        }
        self.buf.push(0);
        Ok(())
    }

    fn question(&mut self, question: &Question) -> Result<(), DomainError> {
        self.name(&question.name)?;
        self.u16(question.record_type.to_u16());
        self.u16(question.class);
        Ok(())
    }

    fn record(&mut self, record: &ResourceRecord) -> Result<(), DomainError> {
        self.name(&record.name)?;
        self.u16(record.record_type.to_u16());
        self.u16(record.class);
        self.u32(record.ttl);
        let rdlength = u16::try_from(record.data.len()).map_err(|_| DomainError::EncodeOverflow {
            size: record.data.len(),
            limit: u16::MAX as usize,
        })?;
        self.u16(rdlength);
        self.buf.extend_from_slice(&record.data);
        Ok(())
    }
}

fn section_count(len: usize) -> Result<u16, DomainError> {
    u16::try_from(len).map_err(|_| DomainError::EncodeOverflow {
        size: len,
        limit: u16::MAX as usize,
    })
}

pub fn encode(message: &Message, limit: usize) -> Result<Vec<u8>, DomainError> {
    let mut writer = Writer::new();

    writer.u16(message.header.id);
    writer.u16(message.header.flags());
    writer.u16(section_count(message.questions.len())?);
    writer.u16(section_count(message.answers.len())?);
    writer.u16(section_count(message.authorities.len())?);
    writer.u16(section_count(message.additionals.len())?);
    debug_assert_eq!(writer.buf.len(), HEADER_LEN);

    for question in &message.questions {
        writer.question(question)?;
    }
    for record in message
        .answers
        .iter()
        .chain(&message.authorities)
        .chain(&message.additionals)
    {
        writer.record(record)?;
    }

    if writer.buf.len() > limit {
        return Err(DomainError::EncodeOverflow {
            size: writer.buf.len(),
            limit,
        });
    }

    Ok(writer.buf)
}
