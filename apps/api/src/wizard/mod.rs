// Brag-Sheet Wizard: role-conditional validation schema and the multi-step
// form state machine, plus the submission/draft endpoints.

pub mod handlers;
pub mod machine;
pub mod schema;
