//! Built-in starting documents written by `init`

/// Models document with placeholder credentials
pub const DEFAULT_MODELS_JSON: &str = r#"{
  "openai-whisper": {
    "baseUrl": "https://api.openai.com/v1",
    "apiKey": "",
    "implementation": "whisper",
    "model": "whisper-1"
  },
  "openai-gpt": {
    "baseUrl": "https://api.openai.com/v1",
    "apiKey": "",
    "implementation": "chat",
    "model": "gpt-4o"
  }
}
"#;

/// Audio → transcript → notes → summary workflow
pub const DEFAULT_PIPELINE_JSON: &str = r#"{
  "transcribe": {
    "modelConfig": "openai-whisper",
    "input": "inbox/audio/",
    "output": "inbox/transcripts/{filename}.md",
    "archive": "archive/audio/{date}/",
    "routingAwareOutput": {
      "process": "Every transcript is turned into structured notes."
    },
    "description": "Transcribe audio recordings"
  },
  "process": {
    "modelConfig": "openai-gpt",
    "input": "inbox/transcripts/",
    "output": "notes/{filename}.md",
    "archive": "archive/transcripts/{date}/",
    "template": "templates/process.md",
    "include": ["prompts/process.md"],
    "routingAwareOutput": {
      "summarize": "The notes cover a long meeting or lecture that needs a summary.",
      "default": "Short notes that need no further processing."
    },
    "description": "Turn transcripts into structured notes"
  },
  "summarize": {
    "modelConfig": "openai-gpt",
    "input": "notes/",
    "output": "summaries/{filename}-summary.md",
    "template": "templates/summary.md",
    "description": "Summarize long notes"
  }
}
"#;
