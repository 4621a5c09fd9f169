//! Scene code segment extraction
//!
//! A scene code names a fault scenario as `tool.scope-target.action`,
//! e.g. `chaosmesh.k8s-pod.pod-failure`. The grammar itself belongs to the
//! upstream scheduler; this module only pulls out the segments the invoker
//! consumes.

use crate::error::{AppError, AppResult};

/// Returns the `scope-target` segment, e.g. `k8s-pod`
pub fn target(scene_code: &str) -> AppResult<&str> {
    scene_code
        .split('.')
        .nth(1)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::MalformedSceneCode(scene_code.to_string()))
}

/// Returns the action segment (everything after the last dot), e.g. `pod-failure`
pub fn action(scene_code: &str) -> AppResult<&str> {
    scene_code
        .rsplit('.')
        .next()
        .filter(|s| !s.is_empty() && scene_code.contains('.'))
        .ok_or_else(|| AppError::MalformedSceneCode(scene_code.to_string()))
}

/// Returns the fault-type discriminator: the part of the target after the
/// first `-`, e.g. `pod` from `k8s-pod`
pub fn target_type(scene_code: &str) -> AppResult<&str> {
    let target = target(scene_code)?;
    target
        .split('-')
        .nth(1)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::MalformedSceneCode(scene_code.to_string()))
}
