//! Root crate facade for the ZenCode core pipeline and HTTP server.

pub use zencode_core::{
    classify, codec, derive_id, detection, gateway, ident, store, telemetry, LanguageTag,
    MemoryStore, RedbStore, ShareResult, ShortId,
};
pub use zencode_server::{
    config, create_app, error, handlers, open_store, resolve_bind_address, serve_router, AppError,
    AppState, Config, KvStore, ShareGateway, Tracker,
};
