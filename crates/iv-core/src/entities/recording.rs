/// One question's captured recording, held in memory until its upload job ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingBlob {
    pub question_id: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl RecordingBlob {
    /// Concatenate captured chunks in arrival order.
    #[must_use]
    pub fn from_chunks(question_id: &str, mime_type: &str, chunks: Vec<Vec<u8>>) -> Self {
        Self {
            question_id: question_id.to_string(),
            mime_type: mime_type.to_string(),
            data: chunks.concat(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// File name used for multipart uploads (`question-<id>.<ext>`).
    #[must_use]
    pub fn file_name(&self) -> String {
        let ext = self
            .mime_type
            .split('/')
            .nth(1)
            .and_then(|sub| sub.split(';').next())
            .filter(|sub| !sub.is_empty())
            .unwrap_or("bin");
        format!("question-{}.{ext}", self.question_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_concatenate_in_order() {
        let blob = RecordingBlob::from_chunks("q1", "video/webm", vec![vec![1, 2], vec![], vec![3]]);
        assert_eq!(blob.data, vec![1, 2, 3]);
        assert_eq!(blob.len(), 3);
    }

    #[test]
    fn no_chunks_is_empty() {
        assert!(RecordingBlob::from_chunks("q1", "video/webm", Vec::new()).is_empty());
    }

    #[test]
    fn file_name_strips_codec_parameters() {
        let blob = RecordingBlob::from_chunks("7", "video/webm;codecs=vp9,opus", vec![vec![0]]);
        assert_eq!(blob.file_name(), "question-7.webm");
        let odd = RecordingBlob::from_chunks("7", "garbage", vec![vec![0]]);
        assert_eq!(odd.file_name(), "question-7.bin");
    }
}
