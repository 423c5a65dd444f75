use shortlist_core::config::EmailSettings;
use shortlist_core::types::{ChatMessage, ScoredChunk};

pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Retrieved chunk texts in retrieval order.
pub fn context_block(chunks: &[ScoredChunk]) -> String {
    chunks.iter().map(|c| c.chunk.content.as_str()).collect::<Vec<_>>().join(CONTEXT_SEPARATOR)
}

pub fn answer_messages(query: &str, chunks: &[ScoredChunk]) -> Vec<ChatMessage> {
    let prompt = format!(
        "Answer the questions based on the provided portfolio context only.\n\
         Please provide the most accurate response based on the given information.\n\
         <context>\n{}\n<context>\n\
         Questions: {}",
        context_block(chunks),
        query
    );
    vec![ChatMessage::user(prompt)]
}

pub fn email_messages(answer: &str, email: &EmailSettings) -> Vec<ChatMessage> {
    let system = format!(
        "We are working as a placement officer in placement consultancy {agency}.\n\
         We have shortlisted candidates' portfolios as per the requirements in the {recruiter} job post.\n\
         Create an email to the recruitment team of {recruiter} mentioning that we have the best suitable candidates for this job post.\n\
         Do not provide unnecessary extra information.",
        agency = email.agency,
        recruiter = email.recruiter
    );
    vec![ChatMessage::system(system), ChatMessage::user(format!("Details: {answer}"))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortlist_core::types::{Chunk, Meta, Role};

    fn scored(content: &str, score: f32) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk {
                id: "portfolio_0:0".into(),
                content: content.into(),
                metadata: Meta::new(),
                chunk_index: 0,
                total_chunks: 1,
            },
            score,
        }
    }

    #[test]
    fn answer_prompt_keeps_retrieval_order() {
        let retrieved = [scored("first", 0.9), scored("second", 0.5)];
        let msgs = answer_messages("Who knows Python?", &retrieved);
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].role, Role::User);
        assert!(msgs[0].content.contains("<context>\nfirst\n\nsecond\n<context>"));
        assert!(msgs[0].content.ends_with("Questions: Who knows Python?"));
    }

    #[test]
    fn email_prompt_names_agency_and_recruiter() {
        let email = EmailSettings { agency: "Acme Talent".into(), recruiter: "Globex".into() };
        let msgs = email_messages("Alice knows Python.", &email);
        assert_eq!(msgs[0].role, Role::System);
        assert!(msgs[0].content.contains("placement consultancy Acme Talent"));
        assert!(msgs[0].content.contains("recruitment team of Globex"));
        assert_eq!(msgs[1].content, "Details: Alice knows Python.");
    }
}
