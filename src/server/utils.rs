//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::ApiError;

impl HttpServer {
    /// Turn a bind failure into an actionable error message
    ///
    /// The two common cases, a taken port and a privileged port, get a hint
    /// about how to recover; anything else keeps the raw OS error.
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> ApiError {
        let detail = error.to_string();
        let port_taken = error.kind() == std::io::ErrorKind::AddrInUse
            || detail.contains("os error 48")
            || detail.contains("os error 98");
        let privileged = error.kind() == std::io::ErrorKind::PermissionDenied
            || detail.contains("os error 13");

        if port_taken {
            let next = port + 1;
            ApiError::internal(format!(
                "Port {port} is already in use.\n\
                 Free it or move to another port:\n\
                 \x20 lsof -i :{port}\n\
                 \x20 lsof -ti :{port} | xargs kill\n\
                 \x20 LYNXPROMPT_PORT={next} ./lynxprompt"
            ))
        } else if privileged {
            ApiError::internal(format!(
                "Permission denied binding port {port}.\n\
                 Ports below 1024 require elevated privileges; use an \
                 unprivileged port instead:\n\
                 \x20 LYNXPROMPT_PORT=8080 ./lynxprompt"
            ))
        } else {
            ApiError::internal(format!("Failed to bind to {}: {}", bind_addr, error))
        }
    }
}
