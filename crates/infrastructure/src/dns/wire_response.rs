//! Error replies assembled directly in wire format.
//!
//! Used when there is no upstream answer to relay. The header and question
//! section are copied from the query so the client can match the reply.

const HEADER_LEN: usize = 12;

pub const RCODE_FORMERR: u8 = 1;
pub const RCODE_SERVFAIL: u8 = 2;

/// Builds a reply to `query` carrying `rcode`.
///
/// ID, OPCODE, RD and the question section are echoed; QR and RA are set;
/// answer, authority and additional sections are empty. If the question
/// section cannot be walked, the reply carries the header only.
/// Returns `None` when `query` is shorter than a DNS header.
pub fn build_error_response(query: &[u8], rcode: u8) -> Option<Vec<u8>> {
    if query.len() < HEADER_LEN {
        return None;
    }

    let qdcount = u16::from_be_bytes([query[4], query[5]]);
    let (qdcount, question_end) = match question_section_end(query, qdcount) {
        Some(end) => (qdcount, end),
        None => (0, HEADER_LEN),
    };

    let mut buf = Vec::with_capacity(question_end);
    buf.extend_from_slice(&query[0..2]);
    // QR | OPCODE (copied) | RD (copied)
    buf.push(0x80 | (query[2] & 0x79));
    // RA | RCODE
    buf.push(0x80 | (rcode & 0x0F));
    buf.extend_from_slice(&qdcount.to_be_bytes());
    buf.extend_from_slice(&[0x00; 6]);
    buf.extend_from_slice(&query[HEADER_LEN..question_end]);

    Some(buf)
}

pub fn build_servfail_response(query: &[u8]) -> Option<Vec<u8>> {
    build_error_response(query, RCODE_SERVFAIL)
}

fn question_section_end(buf: &[u8], qdcount: u16) -> Option<usize> {
    let mut pos = HEADER_LEN;

    for _ in 0..qdcount {
        loop {
            let label_len = *buf.get(pos)? as usize;
            if label_len == 0 {
                pos += 1;
                break;
            }
            if label_len & 0xC0 == 0xC0 {
                // compression pointer terminates the name
                pos += 2;
                break;
            }
            if label_len & 0xC0 != 0 {
                return None;
            }
            pos += 1 + label_len;
        }

        // QTYPE + QCLASS
        pos += 4;
        if pos > buf.len() {
            return None;
        }
    }

    Some(pos)
}
