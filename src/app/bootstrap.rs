//! Deployment bootstrap.
//!
//! The sequence is strictly linear: read the `environment` context value,
//! resolve account/region, construct the stack, synthesize. An unsupported
//! environment name fails before any stack is constructed, so nothing is
//! written for it.

use serde::Serialize;

use super::App;
use crate::config::{DeploymentEnv, EnvironmentConfig};
use crate::context::AppContext;
use crate::environment::{ResolvedEnvironment, ENVIRONMENT_CONTEXT_KEY};
use crate::error::Result;
use crate::stack::{stack_id, StackProps};
use crate::synth::{CloudAssembly, Synthesizer};

/// Everything resolved for one deployment, before any stack exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentPlan {
    #[serde(flatten)]
    pub resolved: ResolvedEnvironment,
    pub stack_id: String,
    pub props: StackProps,
}

/// Resolve the deployment plan for a context value.
///
/// # Example
///
/// ```
/// use devops_agent::app::plan;
/// use devops_agent::config::DeploymentEnv;
///
/// let plan = plan(Some("prod"), &DeploymentEnv::default().with_region("eu-west-1")).unwrap();
/// assert_eq!(plan.stack_id, "DevopsAgentStack-prod");
/// assert_eq!(plan.props.env.region, "eu-west-1");
/// ```
pub fn plan(environment: Option<&str>, vars: &DeploymentEnv) -> Result<DeploymentPlan> {
    let resolved = ResolvedEnvironment::resolve_name(environment)?;
    let env = EnvironmentConfig::for_environment(resolved.environment, vars);

    Ok(DeploymentPlan {
        stack_id: stack_id(resolved.environment),
        props: StackProps::for_environment(resolved.environment, env),
        resolved,
    })
}

/// Result of a bootstrap run.
#[derive(Debug, Clone)]
pub struct Bootstrapped {
    pub plan: DeploymentPlan,
    pub assembly: CloudAssembly,
}

/// Run the full bootstrap: resolve, construct and synthesize.
pub fn bootstrap(
    context: AppContext,
    vars: &DeploymentEnv,
    synthesizer: &dyn Synthesizer,
) -> Result<Bootstrapped> {
    let mut app = App::new(context);

    let plan = plan(app.try_get_context(ENVIRONMENT_CONTEXT_KEY), vars)?;
    tracing::info!(
        "Deploying {} to {} (environment from {})",
        plan.stack_id,
        plan.props.env,
        plan.resolved.source
    );

    app.add_stack(plan.stack_id.clone(), plan.props.clone())?;
    let assembly = app.synth(synthesizer)?;

    Ok(Bootstrapped { plan, assembly })
}
