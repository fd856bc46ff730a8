/// Named grouping of threads. `thread_count` is a cached aggregate that only
/// thread creation touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Category {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) slug: String,
    pub(crate) description: Option<String>,
    pub(crate) icon: String,
    pub(crate) color: String,
    pub(crate) thread_count: i64,
}
