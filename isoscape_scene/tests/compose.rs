// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for frame composition in `isoscape_scene`.
//!
//! These use the recording renderer's default object sprite (32x32, anchored at
//! its bottom center) and 8x12 glyphs, over a 20x20 map of 16 pixel units seen
//! through a 400x300 viewport at (-200, -20).

use isoscape_geom::{RealPoint, VirtualPoint};
use isoscape_index::{GridLayout, MapCorners, ObjectId, ScreenRect, SpatialIndex};
use isoscape_render::{Drawable, ImageId, ObjectKind, SceneObject, Sprite, TextLabel};
use isoscape_render_ref::{Command, RecordingRenderer};
use isoscape_scene::{DepthOrder, DrawOrder, SceneComposer, footprint};
use kurbo::Point;

type Index = SpatialIndex<Drawable<u32>>;

const VIEWPORT: ScreenRect = ScreenRect::from_origin_size(-200, -20, 400, 300);

fn setup() -> (Index, RecordingRenderer) {
    let layout = GridLayout::new(&MapCorners::for_map(16, 0, 20, 20), 400, 300);
    let renderer = RecordingRenderer::new()
        .with_default_object_sprite(Sprite::new(ImageId(1), 32, 32).with_anchor(16, 28));
    (SpatialIndex::new(layout), renderer)
}

fn add(
    index: &mut Index,
    renderer: &RecordingRenderer,
    at: VirtualPoint,
    kind: ObjectKind,
) -> ObjectId {
    let tag = u32::try_from(index.len()).unwrap();
    let id = index.insert(at, Drawable::new(kind, tag));
    let bounds = footprint::<(), _, _>(renderer, id, index.get(id).unwrap())
        .unwrap()
        .bounds();
    index.place(id, bounds);
    id
}

fn compose(scene: &mut SceneComposer, index: &mut Index, renderer: &RecordingRenderer) {
    scene.compose::<(), _, _>(index, renderer, VIEWPORT, &DepthOrder, &DepthOrder);
}

fn sprite_ids(scene: &SceneComposer) -> Vec<ObjectId> {
    scene.sprites().iter().map(|e| e.object).collect()
}

#[test]
fn objects_in_two_cells_are_collected_once() {
    let (mut index, renderer) = setup();
    // Projects to (160, 100), straddling the cell boundary at x = 160.
    let id = add(&mut index, &renderer, VirtualPoint::ground(10, 90), ObjectKind::Sprite);
    let left = index.cell_at(RealPoint::new(150, 80)).unwrap();
    let right = index.cell_at(RealPoint::new(170, 80)).unwrap();
    assert_ne!(left, right);
    assert_eq!(index.objects_in_cell(left).count(), 1);
    assert_eq!(index.objects_in_cell(right).count(), 1);

    let mut scene = SceneComposer::new(50, 10);
    compose(&mut scene, &mut index, &renderer);
    assert_eq!(sprite_ids(&scene), [id]);
    assert_eq!(scene.sprites()[0].position, RealPoint::new(144 + 200, 72 + 20));
    assert!(index.iter().all(|(_, o)| !o.is_selected()));
}

#[test]
fn hidden_and_offscreen_objects_are_skipped() {
    let (mut index, renderer) = setup();
    let shown = add(&mut index, &renderer, VirtualPoint::ground(40, 40), ObjectKind::Sprite);
    let hidden = add(&mut index, &renderer, VirtualPoint::ground(30, 30), ObjectKind::Sprite);
    // Projects to (252, 150): its cell overlaps the viewport, the sprite does not.
    let offscreen = add(&mut index, &renderer, VirtualPoint::ground(12, 138), ObjectKind::Sprite);
    index.set_visible(hidden, false);

    let mut scene = SceneComposer::new(50, 10);
    compose(&mut scene, &mut index, &renderer);
    assert_eq!(sprite_ids(&scene), [shown]);
    assert!(index.get(offscreen).unwrap().is_linked());
}

#[test]
fn full_buffers_drop_objects() {
    let (mut index, renderer) = setup();
    for i in 0..4 {
        add(&mut index, &renderer, VirtualPoint::ground(20 + i * 8, 20), ObjectKind::Sprite);
    }
    let mut scene = SceneComposer::new(2, 10);
    compose(&mut scene, &mut index, &renderer);
    assert_eq!(scene.sprites().len(), 2);
    assert_eq!(scene.dropped(), 2);
    assert!(index.iter().all(|(_, o)| !o.is_selected()));

    // Selection flags are reset, so the next frame collects the same amount.
    compose(&mut scene, &mut index, &renderer);
    assert_eq!(scene.sprites().len(), 2);
}

#[test]
fn objects_in_two_cells_are_dropped_once() {
    let (mut index, renderer) = setup();
    // Both straddle the cell boundary at x = 160.
    let a = add(&mut index, &renderer, VirtualPoint::ground(10, 90), ObjectKind::Sprite);
    let b = add(&mut index, &renderer, VirtualPoint::ground(11, 91), ObjectKind::Sprite);
    let right = index.cell_at(RealPoint::new(170, 80)).unwrap();
    assert_eq!(index.objects_in_cell(right).count(), 2);

    let mut scene = SceneComposer::new(1, 10);
    compose(&mut scene, &mut index, &renderer);
    assert_eq!(scene.sprites().len(), 1);
    assert!([a, b].contains(&scene.sprites()[0].object));
    assert_eq!(scene.dropped(), 1);
    assert!(index.iter().all(|(_, o)| !o.is_selected()));
}

#[test]
fn debug_labels_mark_projected_positions() {
    let (mut index, mut renderer) = setup();
    // Projects to (0, 80); the sprite's top-left is 16 left of and 28 above it.
    add(&mut index, &renderer, VirtualPoint::ground(40, 40), ObjectKind::Sprite);

    let mut scene = SceneComposer::new(50, 10);
    compose(&mut scene, &mut index, &renderer);
    let entry = scene.sprites()[0];
    assert_eq!(entry.position, RealPoint::new(184, 72));
    assert_eq!(entry.anchor, RealPoint::new(200, 100));

    scene.draw::<(), _, _>(&index, &mut renderer, true);
    let commands = renderer.take_commands();
    assert!(matches!(
        &commands[1],
        Command::DrawText { text, at, .. } if text == "0" && *at == Point::new(200.0, 100.0)
    ));
}

#[test]
fn sorting_is_back_to_front_and_stable() {
    let (mut index, renderer) = setup();
    let front = add(&mut index, &renderer, VirtualPoint::ground(40, 40), ObjectKind::Sprite);
    let back = add(&mut index, &renderer, VirtualPoint::ground(10, 10), ObjectKind::Sprite);
    // Same depth as `front`; placed later, so listed first in the shared cell.
    let beside = add(&mut index, &renderer, VirtualPoint::ground(41, 39), ObjectKind::Sprite);

    let mut scene = SceneComposer::new(50, 10);
    compose(&mut scene, &mut index, &renderer);
    assert_eq!(sprite_ids(&scene), [back, beside, front]);

    // Front to back: ties still keep collection order.
    let reversed = |a: &SceneObject<u32>, b: &SceneObject<u32>| DepthOrder.draws_before(b, a);
    scene.compose::<(), _, _>(&mut index, &renderer, VIEWPORT, &reversed, &reversed);
    assert_eq!(sprite_ids(&scene), [beside, front, back]);
}

#[test]
fn text_is_centered_and_drawn_after_sprites() {
    let (mut index, mut renderer) = setup();
    let sprite = add(&mut index, &renderer, VirtualPoint::ground(40, 40), ObjectKind::Sprite);
    let label = add(
        &mut index,
        &renderer,
        VirtualPoint::ground(40, 40),
        ObjectKind::Text(TextLabel::new("abc")),
    );

    let mut scene = SceneComposer::new(50, 10);
    compose(&mut scene, &mut index, &renderer);
    assert_eq!(sprite_ids(&scene), [sprite]);
    assert_eq!(scene.texts().len(), 1);
    assert_eq!(scene.texts()[0].object, label);
    // 24x12 centered on (0, 80), then made viewport relative.
    assert_eq!(
        scene.texts()[0].bounds,
        ScreenRect::from_origin_size(188, 94, 24, 12)
    );

    scene.draw::<(), _, _>(&index, &mut renderer, false);
    let commands = renderer.take_commands();
    assert!(matches!(commands[0], Command::DrawImage { image: ImageId(1), .. }));
    assert!(matches!(&commands[1], Command::DrawText { text, .. } if text == "abc"));
    assert_eq!(commands.len(), 2);

    scene.draw::<(), _, _>(&index, &mut renderer, true);
    let commands = renderer.take_commands();
    let lines = commands
        .iter()
        .filter(|c| matches!(c, Command::DrawLine { .. }))
        .count();
    assert_eq!(lines, 4);
    assert!(
        commands
            .iter()
            .any(|c| matches!(c, Command::DrawText { text, .. } if text == "0"))
    );
}
