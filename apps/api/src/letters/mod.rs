// Letter Studio core: prompt construction, the generation pipeline, the
// canvas draft state machine, and the context-panel snippet tray.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod canvas;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod snippets;
