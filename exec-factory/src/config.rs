use exec_ir::Layout;

/// In-process configuration for a single `create()` call, per spec §4.1/§6. There is no CLI or
/// config-file layer in scope; a host embedding the factory constructs one of these directly.
#[derive(Clone, Debug)]
pub struct CompilerOptions {
    pub executor: String,
    pub is_primary_subgraph: bool,
    pub he_profiling_mode: bool,
    pub trace_filepath: Option<String>,
    pub user_tensor_layout: Layout,
}

impl CompilerOptions {
    pub fn new(executor: impl Into<String>) -> Self {
        Self {
            executor: executor.into(),
            is_primary_subgraph: true,
            he_profiling_mode: false,
            trace_filepath: None,
            user_tensor_layout: Layout::Nhwc,
        }
    }

    pub fn primary_subgraph(mut self, is_primary: bool) -> Self {
        self.is_primary_subgraph = is_primary;
        self
    }

    pub fn profiling(mut self, on: bool) -> Self {
        self.he_profiling_mode = on;
        self
    }

    pub fn trace_filepath(mut self, path: impl Into<String>) -> Self {
        self.trace_filepath = Some(path.into());
        self
    }

    pub fn user_tensor_layout(mut self, layout: Layout) -> Self {
        self.user_tensor_layout = layout;
        self
    }
}
