/// Use cases module containing application business logic orchestration
mod resolve_visible_graph;

pub use resolve_visible_graph::ResolveVisibleGraphUseCase;
