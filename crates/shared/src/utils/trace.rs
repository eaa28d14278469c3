use crate::utils::{Method, Metrics, Status};
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{Span, error, info, info_span};

pub struct TracingContext {
    pub span: Span,
    pub start_time: Instant,
}

impl TracingContext {
    pub fn start(component: &'static str, operation: &str) -> Self {
        let span = info_span!("operation", component, operation);
        span.in_scope(|| info!("Starting operation: {operation}"));

        Self {
            span,
            start_time: Instant::now(),
        }
    }

    pub async fn success(&self, metrics: &Arc<Mutex<Metrics>>, method: Method, message: &str) {
        self.complete(metrics, method, true, message).await;
    }

    pub async fn error(&self, metrics: &Arc<Mutex<Metrics>>, method: Method, message: &str) {
        self.complete(metrics, method, false, message).await;
    }

    async fn complete(
        &self,
        metrics: &Arc<Mutex<Metrics>>,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let status = if is_success {
            Status::Success
        } else {
            Status::Error
        };

        self.span.in_scope(|| {
            if is_success {
                info!(duration_secs = elapsed, "✅ Operation completed successfully: {message}");
            } else {
                error!(duration_secs = elapsed, "❌ Operation failed: {message}");
            }
        });

        metrics.lock().await.record(method, status, elapsed);
    }
}
