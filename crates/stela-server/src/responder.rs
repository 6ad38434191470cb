//! Query handling.
//!
//! [`handle_query`] is a pure function from query bytes to response bytes.
//! It owns every policy decision about the response: which records match,
//! what the RCODE is, which header flags are set, and where an oversized
//! message gets cut. The transport layer only moves datagrams.

use bytes::Bytes;
use stela_proto::wire::WireWriter;
use stela_proto::{
    Error, Header, HeaderFlags, Question, RecordType, ResponseCode, SoaDefaults,
    MAX_UDP_MESSAGE_SIZE, QTYPE_ANY, QUESTION_OFFSET,
};
use stela_store::RecordStore;
use tracing::debug;

/// Byte offset of the flags word within the message header.
const FLAGS_OFFSET: usize = 2;

/// Builds the full response message for a raw query.
///
/// The query must carry a well-formed header and at least one question;
/// only the first question is answered and echoed. Matching is driven by
/// QTYPE: 255 (ANY) returns every record for the name, recognized types
/// return that type, and anything else falls back to A lookup. The answer
/// section is assembled in store insertion order, then the whole message
/// is cut to [`MAX_UDP_MESSAGE_SIZE`] with the TC flag set if it ran over.
///
/// Errors mean the query could not be decoded. Callers are expected to
/// drop such datagrams without replying.
pub fn handle_query(query: &[u8], store: &RecordStore) -> stela_proto::Result<Bytes> {
    let header = Header::parse(query)?;
    if header.qd_count == 0 {
        return Err(Error::MissingQuestion);
    }

    let (question, question_end) = Question::parse(query, QUESTION_OFFSET)?;

    let records = if question.qtype == QTYPE_ANY {
        store.query_all(question.qname.as_bytes())
    } else {
        store.query_by_type(question.qname.as_bytes(), &RecordType::from_qtype(question.qtype))
    };

    // NXDOMAIN only when the name has no records of any type. A known
    // name that lacks the requested type answers NOERROR with zero
    // answers.
    let rcode = if records.is_empty() && store.query_all(question.qname.as_bytes()).is_empty() {
        ResponseCode::NXDomain
    } else {
        ResponseCode::NoError
    };

    let mut response = Header::response_to(&header);
    response.rcode = rcode.to_u8();
    response.an_count = u16::try_from(records.len()).unwrap_or(u16::MAX);

    let mut writer = WireWriter::with_capacity(question_end + records.len() * 32);
    response.write_to(&mut writer);

    // The question is echoed byte for byte, preserving the client's
    // casing even though matching folded it.
    writer.write_bytes(&query[QUESTION_OFFSET..question_end]);

    let soa = SoaDefaults::default();
    for record in &records {
        record.write_answer(&mut writer, &soa);
    }

    // Cut, never re-plan: ANCOUNT keeps the full match count so clients
    // see both the truncation flag and how much they missed.
    if writer.len() > MAX_UDP_MESSAGE_SIZE {
        response.flags.insert(HeaderFlags::TC);
        writer.patch_u16(FLAGS_OFFSET, response.flags_word());
        writer.truncate(MAX_UDP_MESSAGE_SIZE);
    }

    debug!(
        question = %question,
        answers = records.len(),
        rcode = %rcode,
        truncated = response.is_truncated(),
        "answered query"
    );

    Ok(writer.freeze())
}
