use crate::application::dto::{GraphRequest, GraphResponse, KeyErrorPolicy, KeySource};
use crate::ddg::domain::VisibilityState;
use crate::ddg::services::{
    DdgModelBuilder, GraphModel, OperationSelector, VisibilityCodec, VisibilityScope, EMPTY_KEY,
};
use crate::ports::outbound::{NavigationState, PayloadReader, ProgressReporter};
use crate::shared::error::DdgError;
use crate::shared::Result;
use std::sync::Arc;

/// ResolveVisibleGraphUseCase - Core use case for rendering one view of a DDG
///
/// Loads the payload, builds the model, settles the visibility key against
/// the navigation state and resolves it into a visible graph. Infrastructure
/// is injected through generics.
///
/// # Type Parameters
/// * `PR` - PayloadReader implementation
/// * `REP` - ProgressReporter implementation
pub struct ResolveVisibleGraphUseCase<PR, REP> {
    payload_reader: PR,
    progress_reporter: REP,
}

impl<PR, REP> ResolveVisibleGraphUseCase<PR, REP>
where
    PR: PayloadReader,
    REP: ProgressReporter,
{
    /// Creates a new ResolveVisibleGraphUseCase with injected dependencies
    pub fn new(payload_reader: PR, progress_reporter: REP) -> Self {
        Self {
            payload_reader,
            progress_reporter,
        }
    }

    /// Executes the use case
    ///
    /// The navigation state is only written through
    /// `NavigationState::replace_visibility_key`, and only when:
    /// - it carried no key and the default key was adopted
    /// - it carried a malformed key and the policy fell back to the default key
    /// - show/hide selectors changed the key, unless `KeyErrorPolicy::Empty`
    ///   replaced a malformed key; the link then keeps the key the user sent
    ///
    /// # Errors
    /// Returns an error if the payload cannot be read or built into a model,
    /// if a selector matches nothing, or if the key is malformed under
    /// `KeyErrorPolicy::Strict`.
    pub fn execute<N: NavigationState>(
        &self,
        request: GraphRequest,
        navigation: &mut N,
    ) -> Result<GraphResponse> {
        // Step 1: Load payload
        self.progress_reporter.report(&format!(
            "📖 Loading DDG payload from: {}",
            request.payload_path.display()
        ));
        let payload = self.payload_reader.read_payload(&request.payload_path)?;
        self.progress_reporter
            .report(&format!("✅ Detected {} path(s)", payload.len()));

        // Step 2: Build the model
        let model = DdgModelBuilder::build_with(&payload, &request.focal, |current, total| {
            self.progress_reporter
                .report_progress(current, total, Some("anchoring paths"));
        })?;
        self.progress_reporter.report(&format!(
            "   - Focal operation: {}\n   - Path elements: {} (distance {} to {})\n   - Services: {}",
            model.focal(),
            model.path_elem_count(),
            model.min_distance(),
            model.max_distance(),
            model.services().len()
        ));
        let graph_model = GraphModel::new(Arc::new(model));

        // Step 3: Settle the visibility key
        let state = VisibilityState::from_key(navigation.visibility_key());
        let (mut key, key_source) = self.settle_key(&graph_model, &request, state, navigation)?;

        // Step 4: Apply show/hide selectors
        if !request.show.is_empty() || !request.hide.is_empty() {
            key = self.apply_selectors(&graph_model, key, &request.show, &request.hide)?;
            if key_source != KeySource::Empty {
                navigation.replace_visibility_key(&key)?;
            }
        }

        // Step 5: Resolve
        let graph = graph_model.get_visible(&key)?;
        if graph.stale_index_count() > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} index(es) in the visibility key do not exist in this graph and were ignored.",
                graph.stale_index_count()
            ));
        }
        self.progress_reporter.report(&format!(
            "✅ Resolved {} operation(s) and {} call(s)",
            graph.vertices().len(),
            graph.edges().len()
        ));

        Ok(GraphResponse::new(
            graph_model,
            graph,
            key,
            navigation.to_query_string(),
            key_source,
        ))
    }

    /// Moves the visibility state from pending to resolved and validates the key
    fn settle_key<N: NavigationState>(
        &self,
        graph_model: &GraphModel,
        request: &GraphRequest,
        state: VisibilityState,
        navigation: &mut N,
    ) -> Result<(String, KeySource)> {
        let key = match state {
            VisibilityState::Resolved(key) => key,
            VisibilityState::Pending => {
                let default_key = Self::default_key(graph_model, request.hops);
                navigation.replace_visibility_key(&default_key)?;
                self.progress_reporter.report(&format!(
                    "🧭 No visibility key given; adopted the default view ({})",
                    default_key
                ));
                return Ok((default_key, KeySource::Default));
            }
        };

        let error = match VisibilityCodec::validate(&key) {
            Ok(_) => return Ok((key, KeySource::Navigation)),
            Err(error) => error,
        };

        match request.key_error_policy {
            KeyErrorPolicy::Strict => Err(error.into()),
            KeyErrorPolicy::FallbackToDefault => {
                let default_key = Self::default_key(graph_model, request.hops);
                navigation.replace_visibility_key(&default_key)?;
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: {}\n   Falling back to the default view.",
                    error_summary(&error)
                ));
                Ok((default_key, KeySource::FallbackToDefault))
            }
            KeyErrorPolicy::Empty => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: {}\n   Showing an empty view.",
                    error_summary(&error)
                ));
                Ok((EMPTY_KEY.to_string(), KeySource::Empty))
            }
        }
    }

    fn apply_selectors(
        &self,
        graph_model: &GraphModel,
        key: String,
        show: &[OperationSelector],
        hide: &[OperationSelector],
    ) -> Result<String> {
        let mut key = key;
        for selector in show {
            key = VisibilityScope::show(graph_model.model(), &key, selector)?;
        }
        for selector in hide {
            key = VisibilityScope::hide(graph_model.model(), &key, selector)?;
        }
        self.progress_reporter.report(&format!(
            "🔧 Applied {} show / {} hide selector(s)",
            show.len(),
            hide.len()
        ));
        Ok(key)
    }

    fn default_key(graph_model: &GraphModel, hops: Option<u32>) -> String {
        match hops {
            Some(hops) => VisibilityScope::key_for_hops(graph_model.model(), hops),
            None => graph_model.compute_default_visible_key(),
        }
    }
}

fn error_summary(error: &DdgError) -> String {
    error
        .to_string()
        .lines()
        .take(2)
        .collect::<Vec<_>>()
        .join(" - ")
}
