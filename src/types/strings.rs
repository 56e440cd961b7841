use aliri_braid::braid;

/// Name under which REANA tracks a workflow execution, e.g. `reprov-42`
#[braid(serde)]
pub struct ReanaName;

/// A URL to a resource collection of the ReProv API, e.g.
/// `https://reprov.example.org/workflow_registry`
#[braid(serde)]
pub struct ResourceUrl;
