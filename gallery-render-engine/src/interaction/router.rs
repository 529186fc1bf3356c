use super::panel_registry::{Panel, PanelId, PanelRegistry};
use super::picking::ClickTarget;
use crate::engine::camera::navigation::{CameraPose, NavigationController, OrbitRig, Trip};
use bevy::prelude::*;
use constants::gallery::DEFAULT_WALL_WIDTH;
use constants::navigation::{FLOOR_SAFETY_MARGIN, FOCUS_STANDOFF};

/// The panel currently in focus and where the camera stood before flying to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Focus {
    pub panel: PanelId,
    pub return_pose: CameraPose,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteOutcome {
    Focused { panel: PanelId, pose: CameraPose },
    Released { panel: PanelId, pose: CameraPose },
    Walked { to: Vec3, released: Option<PanelId> },
    OutOfBounds(Vec3),
    Missed,
}

/// Turns picked click targets into camera flights and tracks panel focus.
///
/// Clicking a panel flies up to it; clicking the focused panel again flies
/// back to where the camera was before. Floor clicks walk the camera to the
/// clicked spot unless it lies too close to a wall.
#[derive(Resource, Debug, Clone)]
pub struct ClickRouter {
    focus: Option<Focus>,
    focus_standoff: f32,
    floor_limit: f32,
}

impl Default for ClickRouter {
    fn default() -> Self {
        Self::new(DEFAULT_WALL_WIDTH)
    }
}

impl ClickRouter {
    pub fn new(wall_width: f32) -> Self {
        Self {
            focus: None,
            focus_standoff: FOCUS_STANDOFF,
            floor_limit: wall_width * 0.5 - FLOOR_SAFETY_MARGIN,
        }
    }

    pub fn focus(&self) -> Option<&Focus> {
        self.focus.as_ref()
    }

    /// Largest `|x|` or `|z|` a floor click may target.
    pub fn floor_limit(&self) -> f32 {
        self.floor_limit
    }

    pub fn accepts_floor_point(&self, point: Vec3) -> bool {
        point.x.abs() <= self.floor_limit && point.z.abs() <= self.floor_limit
    }

    pub fn route(
        &mut self,
        target: ClickTarget,
        panels: &PanelRegistry,
        rig: &mut impl OrbitRig,
        navigation: &mut NavigationController,
        now: f64,
    ) -> RouteOutcome {
        match target {
            ClickTarget::Panel(id) => {
                let Some(panel) = panels.get(id) else {
                    debug!("Click on unknown panel {:?}", id);
                    return RouteOutcome::Missed;
                };
                self.click_panel(panel, rig, navigation, now)
            }
            ClickTarget::Floor(point) => self.click_floor(point, rig, navigation, now),
            ClickTarget::Nothing => RouteOutcome::Missed,
        }
    }

    pub fn click_panel(
        &mut self,
        panel: &Panel,
        rig: &mut impl OrbitRig,
        navigation: &mut NavigationController,
        now: f64,
    ) -> RouteOutcome {
        if let Some(focus) = self.focus.filter(|focus| focus.panel == panel.id) {
            self.focus = None;
            let pose = focus.return_pose;
            navigation.move_to(rig, pose.look_at, pose.position, Trip::Return, now);
            return RouteOutcome::Released {
                panel: panel.id,
                pose,
            };
        }

        let return_pose = rig.pose();
        let pose = self.focus_pose(panel, rig.camera_position().y);
        self.focus = Some(Focus {
            panel: panel.id,
            return_pose,
        });
        navigation.move_to(rig, pose.look_at, pose.position, Trip::Forward, now);

        RouteOutcome::Focused {
            panel: panel.id,
            pose,
        }
    }

    pub fn click_floor(
        &mut self,
        point: Vec3,
        rig: &mut impl OrbitRig,
        navigation: &mut NavigationController,
        now: f64,
    ) -> RouteOutcome {
        if !self.accepts_floor_point(point) {
            debug!(
                "Floor click at ({:.2}, {:.2}) is outside the walkable area ±{:.2}",
                point.x, point.z, self.floor_limit
            );
            return RouteOutcome::OutOfBounds(point);
        }

        let released = self.focus.take().map(|focus| focus.panel);
        let position = Vec3::new(point.x, rig.camera_position().y, point.z);
        let look_at = Vec3::new(point.x, rig.orbit_target().y, point.z);
        navigation.move_to(rig, look_at, position, Trip::Forward, now);

        RouteOutcome::Walked {
            to: position,
            released,
        }
    }

    /// Stand off along the panel's normal at the camera's height, facing the panel centre.
    /// The parked position never leaves the walkable floor.
    pub fn focus_pose(&self, panel: &Panel, camera_height: f32) -> CameraPose {
        let limit = self.floor_limit.max(0.0);
        let standoff = panel.center + panel.normal * self.focus_standoff;
        let position = Vec3::new(
            standoff.x.clamp(-limit, limit),
            camera_height,
            standoff.z.clamp(-limit, limit),
        );
        CameraPose {
            position,
            look_at: panel.center,
        }
    }
}
