pub mod mock;
pub mod openai;

pub use mock::{MockProvider, ScriptedProvider, ScriptedReply};
pub use openai::OpenAiProvider;
