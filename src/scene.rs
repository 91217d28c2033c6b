//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files. The mesh
//! file parser proper lives outside this crate; a scene is just the triangle
//! list plus initial camera settings such a loader would produce.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::math::Vec3;
use crate::types::{Color, Triangle, Vertex};

/// Error type for scene loading
#[derive(Debug)]
pub enum SceneError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::ParseError(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::SerializeError(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::IoError(e) => write!(f, "IO error: {}", e),
            SceneError::ParseError(e) => write!(f, "Parse error: {}", e),
            SceneError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {}

/// A renderable scene: world-space triangles plus initial camera settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub background: Color,
    pub camera_position: Vec3,
    pub fov_deg: f32,
    pub triangles: Vec<Triangle>,
}

impl Scene {
    /// Test scene: a vertex-colored cube above a ground quad
    pub fn demo() -> Self {
        let mut triangles = Vec::new();

        // Cube corners
        let corners = [
            Vec3::new(-2.0, -2.0, -2.0),
            Vec3::new(2.0, -2.0, -2.0),
            Vec3::new(2.0, 2.0, -2.0),
            Vec3::new(-2.0, 2.0, -2.0),
            Vec3::new(-2.0, -2.0, 2.0),
            Vec3::new(2.0, -2.0, 2.0),
            Vec3::new(2.0, 2.0, 2.0),
            Vec3::new(-2.0, 2.0, 2.0),
        ];
        let colors = [
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::new(255, 255, 0),
            Color::new(255, 0, 255),
            Color::new(0, 255, 255),
            Color::WHITE,
            Color::new(255, 128, 0),
        ];

        // Two triangles per face, counter-clockwise seen from outside
        let faces: [[usize; 4]; 6] = [
            [0, 1, 2, 3], // front (-z)
            [5, 4, 7, 6], // back (+z)
            [4, 0, 3, 7], // left
            [1, 5, 6, 2], // right
            [3, 2, 6, 7], // top
            [4, 5, 1, 0], // bottom
        ];
        for [a, b, c, d] in faces {
            let v = |i: usize| Vertex::new(corners[i], colors[i]);
            triangles.push(Triangle::new(v(a), v(b), v(c)));
            triangles.push(Triangle::new(v(a), v(c), v(d)));
        }

        // Ground quad below the cube
        let ground = Color::new(60, 60, 70);
        let g = [
            Vec3::new(-10.0, -3.0, -10.0),
            Vec3::new(10.0, -3.0, -10.0),
            Vec3::new(10.0, -3.0, 10.0),
            Vec3::new(-10.0, -3.0, 10.0),
        ];
        triangles.push(Triangle::new(
            Vertex::new(g[0], ground),
            Vertex::new(g[1], ground),
            Vertex::new(g[2], ground),
        ));
        triangles.push(Triangle::new(
            Vertex::new(g[0], ground),
            Vertex::new(g[2], ground),
            Vertex::new(g[3], ground),
        ));

        Self {
            name: "demo".to_string(),
            background: Color::new(18, 18, 24),
            camera_position: Vec3::new(0.0, 0.0, -25.0),
            fov_deg: 60.0,
            triangles,
        }
    }
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let contents = fs::read_to_string(path)?;
    let scene: Scene = ron::from_str(&contents)?;
    Ok(scene)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(scene, config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Load a scene from a RON string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str) -> Result<Scene, SceneError> {
    let scene: Scene = ron::from_str(s)?;
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_shape() {
        let scene = Scene::demo();
        // 6 cube faces * 2 + 2 ground triangles
        assert_eq!(scene.triangles.len(), 14);
        assert_eq!(scene.fov_deg, 60.0);
    }

    #[test]
    fn test_ron_round_trip() {
        let scene = Scene::demo();
        let text = ron::ser::to_string_pretty(&scene, ron::ser::PrettyConfig::default()).unwrap();
        let back = load_scene_from_str(&text).unwrap();
        assert_eq!(back.name, scene.name);
        assert_eq!(back.triangles.len(), scene.triangles.len());
        assert_eq!(back.triangles[0], scene.triangles[0]);
    }

    #[test]
    fn test_bad_ron_is_parse_error() {
        let err = load_scene_from_str("(nonsense").unwrap_err();
        assert!(matches!(err, SceneError::ParseError(_)));
    }
}
