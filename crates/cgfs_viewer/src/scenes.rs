//! Built-in chapter scenes.
//!
//! Each chapter renders one frame into a [`PixelSink`] and presents it.

use std::sync::Arc;

use anyhow::Result;
use clap::ValueEnum;
use cgfs_core::{Color, Light, PixelSink, Sphere, StaticScene};
use cgfs_math::{rotation_y, Camera, IVec2, Mat4, Vec3};
use cgfs_rasterizer::{
    draw_filled_triangle, draw_line, draw_shaded_triangle, draw_wireframe_triangle, render_scene,
    ModelTable, RasterConfig, RasterScene, RenderMode, SceneInstance, Transform,
};
use cgfs_raytracer::{render, render_parallel, ViewportCamera};

use crate::settings::RenderSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Chapter {
    BasicRaytracing,
    Light,
    Shadows,
    Reflections,
    Lines,
    FilledTriangle,
    ShadedTriangle,
    Perspective,
    Scene,
    Clipping,
}

impl Chapter {
    pub fn name(&self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default()
    }

    pub fn description(&self) -> &'static str {
        match self {
            Chapter::BasicRaytracing => "Three flat-colored spheres",
            Chapter::Light => "Diffuse and specular lighting without shadows",
            Chapter::Shadows => "Lighting with shadow rays",
            Chapter::Reflections => "Shadows plus recursive reflections",
            Chapter::Lines => "Two lines",
            Chapter::FilledTriangle => "A filled triangle with its outline",
            Chapter::ShadedTriangle => "A Gouraud-shaded triangle",
            Chapter::Perspective => "A wireframe cube in perspective",
            Chapter::Scene => "Two transformed cube instances seen from a moved camera",
            Chapter::Clipping => "Cube instances clipped against the view frustum",
        }
    }

    pub fn is_ray_traced(&self) -> bool {
        matches!(
            self,
            Chapter::BasicRaytracing | Chapter::Light | Chapter::Shadows | Chapter::Reflections
        )
    }

    /// Render this chapter into `sink` and present the frame.
    pub fn render(&self, settings: &RenderSettings, sink: &mut dyn PixelSink) -> Result<()> {
        log::info!("Rendering chapter '{}' at {}x{}", self.name(), sink.width(), sink.height());

        match self {
            Chapter::BasicRaytracing => trace(&basic_scene(), settings.trace, settings, sink),
            Chapter::Light => trace(&lit_scene(false), settings.trace.with_shadows(false), settings, sink),
            Chapter::Shadows => trace(&lit_scene(false), settings.trace, settings, sink),
            Chapter::Reflections => trace(
                &lit_scene(true),
                settings.trace.with_background(Color::BLACK),
                settings,
                sink,
            ),
            Chapter::Lines => {
                sink.clear(Color::WHITE);
                draw_line(sink, IVec2::new(-200, -100), IVec2::new(240, 120), Color::BLACK);
                draw_line(sink, IVec2::new(-50, -200), IVec2::new(60, 240), Color::BLACK);
                Ok(sink.present()?)
            }
            Chapter::FilledTriangle => {
                let [p0, p1, p2] = triangle_points();
                sink.clear(Color::WHITE);
                draw_filled_triangle(sink, p0, p1, p2, Color::GREEN);
                draw_wireframe_triangle(sink, p0, p1, p2, Color::BLACK);
                Ok(sink.present()?)
            }
            Chapter::ShadedTriangle => {
                sink.clear(Color::WHITE);
                draw_shaded_triangle(sink, triangle_points(), [0.3, 0.1, 1.0], Color::GREEN);
                Ok(sink.present()?)
            }
            Chapter::Perspective => raster(&perspective_scene(), settings.raster, sink),
            Chapter::Scene => raster(&instances_scene(false), settings.raster, sink),
            Chapter::Clipping => raster(&instances_scene(true), settings.raster, sink),
        }
    }
}

fn trace(
    scene: &StaticScene,
    config: cgfs_raytracer::TraceConfig,
    settings: &RenderSettings,
    sink: &mut dyn PixelSink,
) -> Result<()> {
    let camera = ViewportCamera::default();
    if settings.parallel {
        render_parallel(scene, &camera, &config, sink)?;
    } else {
        render(scene, &camera, &config, sink)?;
    }
    Ok(())
}

fn raster(scene: &RasterScene, config: RasterConfig, sink: &mut dyn PixelSink) -> Result<()> {
    let stats = render_scene(scene, &config, sink)?;
    log::info!(
        "Drew {} triangles from {} instances ({} culled, {} clip vertices)",
        stats.triangles_drawn,
        stats.instances_drawn,
        stats.instances_culled,
        stats.vertices_added
    );
    Ok(())
}

fn triangle_points() -> [IVec2; 3] {
    [IVec2::new(-200, -250), IVec2::new(200, 50), IVec2::new(20, 250)]
}

/// Red, blue and green spheres under flat ambient light.
pub fn basic_scene() -> StaticScene {
    let mut scene = StaticScene::with_ambient();
    scene.add_spheres(
        [
            (Vec3::new(0.0, -1.0, 3.0), Color::RED),
            (Vec3::new(2.0, 0.0, 4.0), Color::BLUE),
            (Vec3::new(-2.0, 0.0, 4.0), Color::GREEN),
        ]
        .into_iter()
        .filter_map(|(center, color)| Sphere::new(center, 1.0, color).ok()),
    );
    scene
}

/// The basic spheres with specular highlights on a huge yellow floor sphere,
/// lit by ambient, point and directional lights.
pub fn lit_scene(reflective: bool) -> StaticScene {
    let spheres = [
        (Vec3::new(0.0, -1.0, 3.0), 1.0, Color::RED, 500.0, 0.2),
        (Vec3::new(2.0, 0.0, 4.0), 1.0, Color::BLUE, 500.0, 0.3),
        (Vec3::new(-2.0, 0.0, 4.0), 1.0, Color::GREEN, 10.0, 0.4),
        (Vec3::new(0.0, -5001.0, 0.0), 5000.0, Color::YELLOW, 1000.0, 0.5),
    ];

    let mut scene = StaticScene::new();
    scene.add_lights([
        Light::ambient(0.2),
        Light::point(Vec3::new(2.0, 1.0, 0.0), 0.6),
        Light::directional(Vec3::new(1.0, 4.0, 4.0), 0.2),
    ]);
    scene.add_spheres(spheres.into_iter().filter_map(
        |(center, radius, color, specular, reflectivity)| {
            let sphere = Sphere::new(center, radius, color).ok()?.with_specular(specular);
            Some(if reflective {
                sphere.with_reflectivity(reflectivity)
            } else {
                sphere
            })
        },
    ));
    scene
}

/// One cube to the left of centre, camera at the origin.
pub fn perspective_scene() -> RasterScene {
    let mut scene = RasterScene::new(Arc::new(ModelTable::builtin()));
    scene.add_instance(SceneInstance::with_translation("cube", Vec3::new(-1.5, 0.0, 7.0)));
    scene
}

/// Two cubes seen from a camera moved left and turned right; with `clipped`
/// a third cube sits behind the camera and the view frustum is enabled.
pub fn instances_scene(clipped: bool) -> RasterScene {
    let camera = Camera::new(Vec3::new(-3.0, 1.0, 2.0), rotation_y(30.0));
    let mut scene = RasterScene::new(Arc::new(ModelTable::builtin())).with_camera(camera);

    scene.add_instances([
        SceneInstance::new(
            "cube",
            Transform::new(0.75, Mat4::IDENTITY, Vec3::new(-1.5, 0.0, 7.0)),
        ),
        SceneInstance::new(
            "cube",
            Transform::new(1.0, rotation_y(195.0), Vec3::new(1.25, 2.5, 7.5)),
        ),
    ]);
    scene.add_lights([
        Light::ambient(0.2),
        Light::point(Vec3::new(-3.0, 2.0, -10.0), 0.6),
        Light::directional(Vec3::new(-1.0, 0.0, 1.0), 0.2),
    ]);

    if clipped {
        scene.add_instance(SceneInstance::new(
            "cube",
            Transform::new(1.0, rotation_y(195.0), Vec3::new(0.0, 0.0, -10.0)),
        ));
        scene = scene.with_clipping(RasterConfig::default().viewport.frustum());
    }
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgfs_core::FrameBuffer;

    #[test]
    fn test_chapter_names_are_kebab_case() {
        assert_eq!(Chapter::BasicRaytracing.name(), "basic-raytracing");
        assert_eq!(Chapter::ShadedTriangle.name(), "shaded-triangle");
        assert_eq!(Chapter::value_variants().len(), 10);
    }

    #[test]
    fn test_lit_scene_lights_normalized() {
        let scene = lit_scene(true);
        assert_eq!(scene.sphere_count(), 4);
        assert!((scene.lights.total_intensity() - 1.0).abs() < 1e-5);
        assert!(scene.spheres.iter().all(|s| s.reflectivity > 0.0));
        assert!(lit_scene(false).spheres.iter().all(|s| s.reflectivity == 0.0));
    }

    #[test]
    fn test_every_chapter_renders() {
        let settings = RenderSettings {
            width: 48,
            height: 48,
            ..Default::default()
        };

        for chapter in Chapter::value_variants() {
            let mut buffer = FrameBuffer::new(settings.width, settings.height).unwrap();
            chapter.render(&settings, &mut buffer).unwrap();
            assert_eq!(buffer.frames_presented(), 1, "{}", chapter.name());
        }
    }

    #[test]
    fn test_clipping_chapter_culls_hidden_cube() {
        let scene = instances_scene(true);
        let mut buffer = FrameBuffer::new(64, 64).unwrap();
        let config = RasterConfig::default().with_mode(RenderMode::Wireframe);

        let stats = render_scene(&scene, &config, &mut buffer).unwrap();
        assert_eq!(stats.instances_culled, 1);
        assert_eq!(stats.instances_drawn, 2);
    }
}
