// Constants used by the app, structured into modules.

/// 3D camera
pub mod camera_3d_constants {
    pub const CAMERA_3D_INITIAL_X: f32 = 4.5;
    pub const CAMERA_3D_INITIAL_Y: f32 = 4.0;
    pub const CAMERA_3D_INITIAL_Z: f32 = 7.0;
}

/// Lights
pub mod lighting_constants {
    pub const DIRECTIONAL_ILLUMINANCE: f32 = 4_000.0;
    pub const AMBIENT_BRIGHTNESS: f32 = 300.0;
}

/// Cube look
pub mod cube_view_constants {
    use bevy::prelude::Color;
    use rubik_core::FacePivot;

    pub const CUBIE_BODY_SCALE: f32 = 0.96;
    pub const STICKER_SCALE: f32 = 0.84;
    pub const STICKER_THICKNESS: f32 = 0.02;

    pub const BODY_COLOR: Color = Color::srgb(0.05, 0.05, 0.05);

    pub fn sticker_color(pivot: FacePivot) -> Color {
        match pivot {
            FacePivot::Blue => Color::srgb(0.05, 0.25, 0.85),
            FacePivot::Red => Color::srgb(0.8, 0.08, 0.08),
            FacePivot::Green => Color::srgb(0.05, 0.65, 0.2),
            FacePivot::Yellow => Color::srgb(0.95, 0.85, 0.05),
            FacePivot::White => Color::srgb(0.95, 0.95, 0.95),
            FacePivot::Orange => Color::srgb(1.0, 0.45, 0.0),
        }
    }
}

/// Debug overlay
pub mod debug_constants {
    use bevy::prelude::Vec3;

    pub const PIVOT_ARROW_LENGTH: f32 = 0.8;
    pub const JOINT_RADIUS: f32 = 0.06;

    // Demo arm: base position, then link offsets with their joint angles in degrees.
    pub const ARM_BASE: Vec3 = Vec3::new(-3.5, -1.5, 0.0);
    pub const ARM_LINKS: [(Vec3, Vec3); 4] = [
        (ARM_BASE, Vec3::new(0.0, 30.0, 0.0)),
        (Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, -45.0)),
        (Vec3::new(0.0, 1.2, 0.0), Vec3::new(0.0, 0.0, -60.0)),
        (Vec3::new(0.0, 0.8, 0.0), Vec3::ZERO),
    ];
}
