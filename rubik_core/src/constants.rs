// Constants used by the cube logic and shared with the application.

/// Face rotation
pub mod rotation_constants {
    // Length of an eased face turn in seconds (domain of the easing curve).
    pub const FACE_ROTATION_SECS: f32 = 0.5;

    // Half thickness of the slab around a face plane that counts as "on the face".
    pub const MEMBERSHIP_TOLERANCE: f32 = 0.01;

    // A group is released only when its twist is this close to a multiple of 90 degrees.
    pub const ALIGNMENT_TOLERANCE_DEG: f32 = 1e-3;

    pub const QUARTER_TURN_DEG: f32 = 90.0;
}

/// Whole cube
pub mod cube_constants {
    // Distance between neighbouring cubie centres.
    pub const CUBIE_SPACING: f32 = 1.0;

    // Cubies per edge of the standard cube.
    pub const CUBE_ORDER: usize = 3;
    pub const CUBIE_COUNT: usize = CUBE_ORDER * CUBE_ORDER * CUBE_ORDER;

    // Duration of a 90 degree spin of the whole cube in seconds.
    pub const CUBE_SPIN_SECS: f32 = 0.35;

    // Hands further than this from the cube centre (in cube units) grab nothing.
    pub const GRAB_RADIUS: f32 = 1.2;
}

/// Scrambling
pub mod scramble_constants {
    pub const SCRAMBLE_ROTATIONS: u32 = 20;

    // Seed for the random number generator.
    pub const SEED: u64 = 69;
}
