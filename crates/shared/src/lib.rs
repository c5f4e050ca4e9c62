pub mod journal;

pub mod settings {
    use serde::{Deserialize, Serialize};

    fn default_model() -> String {
        "gemini-2.5-flash".to_string()
    }

    fn default_true() -> bool {
        true
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AppSettings {
        /// Gemini model id used for chat completions
        #[serde(default = "default_model")]
        pub gemini_model: String,
        #[serde(default = "default_true")]
        pub dark_mode: bool,
    }

    impl Default for AppSettings {
        fn default() -> Self {
            Self {
                gemini_model: default_model(),
                dark_mode: true,
            }
        }
    }
}

pub mod chat {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum ChatRole {
        User,
        Agent,
        System,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ChatMessage {
        pub role: ChatRole,
        pub content: String,
        pub timestamp: DateTime<Utc>,
    }

    impl ChatMessage {
        pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
            Self {
                role,
                content: content.into(),
                timestamp: Utc::now(),
            }
        }
    }
}
