//! Optional trace hooks.
//!
//! With the `trace` feature every structural mutation emits a TRACE event
//! under the `static_lists` target; `trace-construct` does the same for list
//! initialisation and drop. Without the features the arguments are
//! evaluated and discarded.

/// Traces a structural mutation on `this`, optionally with an operand.
macro_rules! trace_op {
    ($op:literal, $this:expr) => {{
        #[cfg(feature = "trace")]
        ::tracing::trace!(target: "static_lists", op = $op, this = ?$this);
        #[cfg(not(feature = "trace"))]
        let _ = $this;
    }};
    ($op:literal, $this:expr, $node:expr) => {{
        #[cfg(feature = "trace")]
        ::tracing::trace!(target: "static_lists", op = $op, this = ?$this, node = ?$node);
        #[cfg(not(feature = "trace"))]
        let _ = ($this, $node);
    }};
}

/// Traces list construction and destruction.
macro_rules! trace_construct {
    ($op:literal, $this:expr) => {{
        #[cfg(feature = "trace-construct")]
        ::tracing::trace!(target: "static_lists", op = $op, this = ?$this);
        #[cfg(not(feature = "trace-construct"))]
        let _ = $this;
    }};
}

pub(crate) use trace_construct;
pub(crate) use trace_op;
