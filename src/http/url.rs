use std::fmt::Write;

/// Appends each segment to `base_url`, percent-encoding anything outside the
/// unreserved set so ids can never alter the path.
pub fn construct_url(base_url: &str, segments: &[&str]) -> Result<String, std::fmt::Error> {
    let guessed_length = base_url.len() + segments.iter().map(|s| s.len() + 1).sum::<usize>();
    let mut url = String::with_capacity(guessed_length);

    url.push_str(base_url.trim_end_matches('/'));

    for segment in segments {
        url.push('/');
        encode_into(&mut url, segment)?;
    }

    Ok(url)
}

fn encode_into(buffer: &mut String, input: &str) -> Result<(), std::fmt::Error> {
    for b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                buffer.push(*b as char);
            }
            _ => {
                write!(buffer, "%{:02X}", b)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::construct_url;

    #[test]
    fn joins_segments_onto_base() {
        let url = construct_url(
            "https://web.mashov.info/api/",
            &["students", "0b5c6a2e-1234", "grades"],
        )
        .unwrap();
        assert_eq!(url, "https://web.mashov.info/api/students/0b5c6a2e-1234/grades");
    }

    #[test]
    fn escapes_path_breaking_characters() {
        let url = construct_url("http://localhost", &["students", "../a b?c", "behave"]).unwrap();
        assert_eq!(url, "http://localhost/students/..%2Fa%20b%3Fc/behave");
    }
}
