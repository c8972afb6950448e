use crate::errors::receive_frame_error::ReceiveFrameError;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

pub const MAX_FRAME_LENGTH: usize = 8 * 1024;

/// Splits a byte stream into newline-terminated frames. Bytes of an
/// unfinished frame stay buffered, so `receive_frame` can be dropped and
/// polled again without losing data.
pub struct FrameReader<R> {
    rd: BufReader<R>,
    buf: Vec<u8>,
    discarding: bool,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(rd: R) -> Self {
        FrameReader {
            rd: BufReader::new(rd),
            buf: Vec::new(),
            discarding: false,
        }
    }

    /// Returns the next frame. A frame over `MAX_FRAME_LENGTH` is skipped up
    /// to its newline and reported once as `TooLong`; the stream stays usable.
    pub async fn receive_frame(&mut self) -> Result<Vec<u8>, ReceiveFrameError> {
        loop {
            if self.discarding {
                self.skip_to_newline().await?;
                self.discarding = false;
                return Err(ReceiveFrameError::TooLong(MAX_FRAME_LENGTH));
            }

            let limit = (MAX_FRAME_LENGTH + 1).saturating_sub(self.buf.len()) as u64;
            (&mut self.rd)
                .take(limit)
                .read_until(b'\n', &mut self.buf)
                .await
                .or(Err(ReceiveFrameError::Disconnected))?;

            if self.buf.last() == Some(&b'\n') {
                return Ok(std::mem::take(&mut self.buf));
            }

            if self.buf.len() <= MAX_FRAME_LENGTH {
                return Err(ReceiveFrameError::Disconnected);
            }

            self.buf.clear();
            self.discarding = true;
        }
    }

    async fn skip_to_newline(&mut self) -> Result<(), ReceiveFrameError> {
        loop {
            let (consumed, found) = {
                let available = self
                    .rd
                    .fill_buf()
                    .await
                    .or(Err(ReceiveFrameError::Disconnected))?;

                if available.is_empty() {
                    return Err(ReceiveFrameError::Disconnected);
                }

                match available.iter().position(|byte| *byte == b'\n') {
                    Some(index) => (index + 1, true),
                    None => (available.len(), false),
                }
            };

            self.rd.consume(consumed);
            if found {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn splits_on_newlines() {
        let mut frames = FrameReader::new(&b"{\"a\":1}\n{\"b\":2}\n"[..]);

        assert_eq!(frames.receive_frame().await.unwrap(), b"{\"a\":1}\n");
        assert_eq!(frames.receive_frame().await.unwrap(), b"{\"b\":2}\n");
        assert_eq!(
            frames.receive_frame().await,
            Err(ReceiveFrameError::Disconnected)
        );
    }

    #[tokio::test]
    async fn unterminated_frame_at_eof_is_a_disconnect() {
        let mut frames = FrameReader::new(&b"{\"a\":"[..]);

        assert_eq!(
            frames.receive_frame().await,
            Err(ReceiveFrameError::Disconnected)
        );
    }

    #[tokio::test]
    async fn oversized_frame_is_skipped_and_reading_continues() {
        let mut bytes = vec![b'a'; MAX_FRAME_LENGTH * 3];
        bytes.extend_from_slice(b"\n{\"b\":2}\n");
        let mut frames = FrameReader::new(&bytes[..]);

        assert_eq!(
            frames.receive_frame().await,
            Err(ReceiveFrameError::TooLong(MAX_FRAME_LENGTH))
        );
        assert_eq!(frames.receive_frame().await.unwrap(), b"{\"b\":2}\n");
    }

    #[tokio::test]
    async fn oversized_frame_cut_off_by_eof_is_a_disconnect() {
        let bytes = vec![b'a'; MAX_FRAME_LENGTH + 10];
        let mut frames = FrameReader::new(&bytes[..]);

        assert_eq!(
            frames.receive_frame().await,
            Err(ReceiveFrameError::Disconnected)
        );
    }

    #[tokio::test]
    async fn accepts_frame_at_the_limit() {
        let mut bytes = vec![b'a'; MAX_FRAME_LENGTH];
        bytes.push(b'\n');
        let mut frames = FrameReader::new(&bytes[..]);

        assert_eq!(
            frames.receive_frame().await.unwrap().len(),
            MAX_FRAME_LENGTH + 1
        );
    }
}
