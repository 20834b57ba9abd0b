mod sections;
mod session;

pub use sections::Section;
pub use session::EditorSession;
