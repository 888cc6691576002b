use super::header::{Header, HEADER_LEN};
use super::name::{read_name, Name};
use super::{Message, Question};
use crate::dns_record::{RecordType, ResourceRecord};
use crate::errors::DomainError;

/// Smallest possible question: root name (1) + type (2) + class (2).
const MIN_QUESTION_LEN: usize = 5;
/// Smallest possible record: root name (1) + type, class, ttl, rdlength (10).
const MIN_RECORD_LEN: usize = 11;

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8], DomainError> {
        if self.remaining() < len {
            return Err(DomainError::malformed(format!(
                "{} needs {} bytes at offset {}, only {} left",
                what,
                len,
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn u16(&mut self, what: &str) -> Result<u16, DomainError> {
        let b = self.take(2, what)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self, what: &str) -> Result<u32, DomainError> {
        let b = self.take(4, what)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn name(&mut self) -> Result<Name, DomainError> {
        let (name, next) = read_name(self.buf, self.pos)?;
        self.pos = next;
        Ok(name)
    }

    fn question(&mut self) -> Result<Question, DomainError> {
        let name = self.name()?;
        let record_type = RecordType::from_u16(self.u16("question type")?);
        let class = self.u16("question class")?;
        Ok(Question {
            name,
            record_type,
            class,
        })
    }

    fn record(&mut self) -> Result<ResourceRecord, DomainError> {
        let name = self.name()?;
        let record_type = RecordType::from_u16(self.u16("record type")?);
        let class = self.u16("record class")?;
        let ttl = self.u32("record ttl")?;
        let rdlength = self.u16("record data length")? as usize;
        let data = self.take(rdlength, "record data")?.to_vec();
        Ok(ResourceRecord {
            name,
            record_type,
            class,
            ttl,
            data,
        })
    }

    fn section<T>(
        &mut self,
        count: u16,
        min_len: usize,
        label: &str,
        mut read: impl FnMut(&mut Self) -> Result<T, DomainError>,
    ) -> Result<Vec<T>, DomainError> {
        let count = count as usize;
        if count.saturating_mul(min_len) > self.remaining() {
            return Err(DomainError::malformed(format!(
                "{} count {} cannot fit in the remaining {} bytes",
                label,
                count,
                self.remaining()
            )));
        }
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(read(self)?);
        }
        Ok(items)
    }
}

pub fn decode(buf: &[u8]) -> Result<Message, DomainError> {
    if buf.len() < HEADER_LEN {
        return Err(DomainError::malformed(format!(
            "{} bytes is shorter than the {} byte header",
            buf.len(),
            HEADER_LEN
        )));
    }

    let mut reader = Reader::new(buf);
    let id = reader.u16("id")?;
    let flags = reader.u16("flags")?;
    let qdcount = reader.u16("question count")?;
    let ancount = reader.u16("answer count")?;
    let nscount = reader.u16("authority count")?;
    let arcount = reader.u16("additional count")?;

    let questions = reader.section(qdcount, MIN_QUESTION_LEN, "question", Reader::question)?;
    let answers = reader.section(ancount, MIN_RECORD_LEN, "answer", Reader::record)?;
    let authorities = reader.section(nscount, MIN_RECORD_LEN, "authority", Reader::record)?;
    let additionals = reader.section(arcount, MIN_RECORD_LEN, "additional", Reader::record)?;

    Ok(Message {
        header: Header::from_flags(id, flags),
        questions,
        answers,
        authorities,
        additionals,
    })
}
