/// State for each open document
#[derive(Debug)]
pub struct DocumentState {
    pub content: String,
    /// Client-side version of `content`, echoed back with diagnostics
    pub version: i32,
}
