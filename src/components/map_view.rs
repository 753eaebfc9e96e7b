use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement, HtmlCanvasElement};
use yew::prelude::*;

use super::map_controls::MapControls;
use crate::geo::{GeoBounds, GeoPoint, Viewport};
use crate::scene::{cluster_markers, Marker, MapScene, CLUSTER_RADIUS_PX, DECLUSTER_ZOOM};
use crate::state::camera::ZOOM_STEP;
use crate::state::Camera;
use crate::util::format_latlon;

/// Clicks within this many pixels of a marker select it.
const PICK_RADIUS_PX: f64 = 12.0;
/// Mouse movement below this is a click, not a drag.
const DRAG_THRESHOLD_PX: f64 = 3.0;
const PAN_STEP_PX: f64 = 64.0;

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub scene: Rc<MapScene>,
    pub center: GeoPoint,
    pub zoom: f64,
}

fn viewport_for(canvas: &HtmlCanvasElement, cam: &Camera) -> Viewport {
    Viewport {
        center: cam.center,
        zoom: cam.zoom,
        width_px: canvas.width() as f64,
        height_px: canvas.height() as f64,
    }
}

fn stroke_bounds(
    ctx: &CanvasRenderingContext2d,
    vp: &Viewport,
    bounds: GeoBounds,
    color: &str,
    line_width: f64,
) {
    let (x0, y0) = vp.project(GeoPoint {
        lat: bounds.north,
        lon: bounds.west,
    });
    let (x1, y1) = vp.project(GeoPoint {
        lat: bounds.south,
        lon: bounds.east,
    });
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(line_width);
    ctx.stroke_rect(x0, y0, x1 - x0, y1 - y0);
}

fn draw_marker(ctx: &CanvasRenderingContext2d, x: f64, y: f64, color: &str) {
    ctx.begin_path();
    ctx.set_fill_style_str(color);
    ctx.arc(x, y, 6.0, 0.0, std::f64::consts::PI * 2.0).ok();
    ctx.fill();
    ctx.set_stroke_style_str("#ffffff");
    ctx.set_line_width(1.5);
    ctx.stroke();
}

fn draw_cluster_badge(ctx: &CanvasRenderingContext2d, x: f64, y: f64, count: usize) {
    ctx.begin_path();
    ctx.set_fill_style_str("rgba(240,136,62,0.9)");
    ctx.arc(x, y, 14.0, 0.0, std::f64::consts::PI * 2.0).ok();
    ctx.fill();
    ctx.set_stroke_style_str("#ffffff");
    ctx.set_line_width(1.5);
    ctx.stroke();
    ctx.set_fill_style_str("#0e1116");
    ctx.set_font("600 12px sans-serif");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(&count.to_string(), x, y).ok();
}

/// Canvas map: hazard overlay image, raster extent rectangle, city
/// bounding boxes, then clustered asset markers on top. Wheel zooms about
/// the cursor, dragging pans, clicking selects the nearest marker.
#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let camera = use_mut_ref(Camera::default);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let scene_ref = use_mut_ref(|| props.scene.clone());
    let overlay_image = use_mut_ref(|| None::<(String, HtmlImageElement)>);
    let onload_closures = use_mut_ref(Vec::<Closure<dyn FnMut()>>::new);
    let drag_origin = use_mut_ref(|| (0.0_f64, 0.0_f64));
    let selected = use_state(|| None::<Marker>);

    // Scene prop changed (new filter result or scenario): swap and redraw.
    {
        let scene_ref = scene_ref.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with(props.scene.clone(), move |scene| {
            *scene_ref.borrow_mut() = scene.clone();
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }

    // "Center on" selection changed: snap the camera to the new target.
    {
        let camera = camera.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with((props.center, props.zoom), move |(center, zoom)| {
            camera.borrow_mut().jump_to(*center, *zoom);
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }

    // Mount: canvas sizing, draw closure, event listeners.
    {
        let canvas_ref = canvas_ref.clone();
        let camera = camera.clone();
        let scene_ref = scene_ref.clone();
        let draw_ref_setup = draw_ref.clone();
        let overlay_image = overlay_image.clone();
        let onload_closures = onload_closures.clone();
        let drag_origin = drag_origin.clone();
        let selected = selected.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");

            let apply_canvas_size = {
                let canvas = canvas.clone();
                move || {
                    if let Some(parent) = canvas.parent_element() {
                        canvas.set_width(parent.client_width().max(0) as u32);
                        canvas.set_height(parent.client_height().max(0) as u32);
                    }
                }
            };
            apply_canvas_size();

            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let camera = camera.clone();
                let scene_ref = scene_ref.clone();
                let overlay_image = overlay_image.clone();
                let onload_closures = onload_closures.clone();
                let draw_ref_onload = draw_ref_setup.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let ctx = match canvas.get_context("2d").ok().flatten() {
                        Some(c) => c.dyn_into::<CanvasRenderingContext2d>().unwrap(),
                        None => return,
                    };
                    let w = canvas.width() as f64;
                    let h = canvas.height() as f64;
                    let vp = viewport_for(&canvas, &camera.borrow());
                    let scene = scene_ref.borrow().clone();

                    ctx.set_fill_style_str("#0e1116");
                    ctx.fill_rect(0.0, 0.0, w, h);

                    // Swap in the overlay image for the current scenario;
                    // the load callback redraws once the png arrives.
                    {
                        let mut slot = overlay_image.borrow_mut();
                        let stale = match &*slot {
                            Some((path, _)) => *path != scene.overlay.image_path,
                            None => true,
                        };
                        if stale {
                            if let Ok(img) = HtmlImageElement::new() {
                                let onload = {
                                    let draw_ref = draw_ref_onload.clone();
                                    Closure::wrap(Box::new(move || {
                                        if let Some(f) = &*draw_ref.borrow() {
                                            f();
                                        }
                                    })
                                        as Box<dyn FnMut()>)
                                };
                                img.set_onload(Some(onload.as_ref().unchecked_ref()));
                                onload_closures.borrow_mut().push(onload);
                                img.set_src(&scene.overlay.image_path);
                                *slot = Some((scene.overlay.image_path.clone(), img));
                            }
                        }
                    }
                    if let Some((_, img)) = &*overlay_image.borrow() {
                        if img.complete() && img.natural_width() > 0 {
                            let (x0, y0) = vp.project(GeoPoint {
                                lat: scene.overlay.bounds.north,
                                lon: scene.overlay.bounds.west,
                            });
                            let (x1, y1) = vp.project(GeoPoint {
                                lat: scene.overlay.bounds.south,
                                lon: scene.overlay.bounds.east,
                            });
                            ctx.set_global_alpha(scene.overlay.opacity);
                            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                                img,
                                x0,
                                y0,
                                x1 - x0,
                                y1 - y0,
                            )
                            .ok();
                            ctx.set_global_alpha(1.0);
                        }
                    }

                    stroke_bounds(&ctx, &vp, scene.extent, "#8b949e", 1.0);
                    for b in &scene.city_boxes {
                        stroke_bounds(&ctx, &vp, *b, "#388bfd", 1.5);
                    }

                    let points: Vec<(f64, f64)> = scene
                        .markers
                        .iter()
                        .map(|m| vp.project(m.position))
                        .collect();
                    if vp.zoom < DECLUSTER_ZOOM {
                        for cluster in cluster_markers(&points, CLUSTER_RADIUS_PX) {
                            if let [single] = cluster.members[..] {
                                let (x, y) = points[single];
                                draw_marker(&ctx, x, y, scene.markers[single].category.color());
                            } else {
                                draw_cluster_badge(&ctx, cluster.x, cluster.y, cluster.members.len());
                            }
                        }
                    } else {
                        for (i, m) in scene.markers.iter().enumerate() {
                            let (x, y) = points[i];
                            draw_marker(&ctx, x, y, m.category.color());
                        }
                    }
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());
            (draw_closure)();

            // Wheel: zoom about the cursor.
            let wheel_cb = {
                let camera = camera.clone();
                let canvas = canvas.clone();
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
                    e.prevent_default();
                    let cx = e.offset_x() as f64;
                    let cy = e.offset_y() as f64;
                    let w = canvas.width() as f64;
                    let h = canvas.height() as f64;
                    let mut cam = camera.borrow_mut();
                    let before = viewport_for(&canvas, &cam);
                    let anchor = before.unproject(cx, cy);
                    cam.zoom_by(-e.delta_y() * 0.002);
                    let s = viewport_for(&canvas, &cam).px_per_degree();
                    cam.center = GeoPoint {
                        lat: anchor.lat + (cy - h * 0.5) / s,
                        lon: anchor.lon - (cx - w * 0.5) / s,
                    };
                    drop(cam);
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .unwrap();

            let mousedown_cb = {
                let camera = camera.clone();
                let drag_origin = drag_origin.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let mut cam = camera.borrow_mut();
                    cam.panning = true;
                    cam.last_x = e.client_x() as f64;
                    cam.last_y = e.client_y() as f64;
                    *drag_origin.borrow_mut() = (cam.last_x, cam.last_y);
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
                .unwrap();

            let mousemove_cb = {
                let camera = camera.clone();
                let canvas = canvas.clone();
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let mut cam = camera.borrow_mut();
                    if !cam.panning {
                        return;
                    }
                    let x = e.client_x() as f64;
                    let y = e.client_y() as f64;
                    let dx = x - cam.last_x;
                    let dy = y - cam.last_y;
                    cam.last_x = x;
                    cam.last_y = y;
                    let s = viewport_for(&canvas, &cam).px_per_degree();
                    cam.center = GeoPoint {
                        lat: cam.center.lat + dy / s,
                        lon: cam.center.lon - dx / s,
                    };
                    drop(cam);
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .unwrap();

            // Mouse up without drag movement selects the nearest marker.
            let mouseup_cb = {
                let camera = camera.clone();
                let canvas = canvas.clone();
                let scene_ref = scene_ref.clone();
                let drag_origin = drag_origin.clone();
                let selected = selected.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let mut cam = camera.borrow_mut();
                    cam.panning = false;
                    let (ox, oy) = *drag_origin.borrow();
                    let moved = ((e.client_x() as f64 - ox).powi(2)
                        + (e.client_y() as f64 - oy).powi(2))
                    .sqrt();
                    if moved >= DRAG_THRESHOLD_PX {
                        return;
                    }
                    let vp = viewport_for(&canvas, &cam);
                    drop(cam);
                    let cx = e.offset_x() as f64;
                    let cy = e.offset_y() as f64;
                    let scene = scene_ref.borrow().clone();
                    let mut best: Option<(f64, usize)> = None;
                    for (i, m) in scene.markers.iter().enumerate() {
                        let (x, y) = vp.project(m.position);
                        let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
                        if d <= PICK_RADIUS_PX && best.map(|(bd, _)| d < bd).unwrap_or(true) {
                            best = Some((d, i));
                        }
                    }
                    selected.set(best.map(|(_, i)| scene.markers[i].clone()));
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .unwrap();

            let mouseleave_cb = {
                let camera = camera.clone();
                Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                    camera.borrow_mut().panning = false;
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mouseleave",
                    mouseleave_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let resize_cb = {
                let apply_canvas_size = apply_canvas_size.clone();
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    apply_canvas_size();
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .unwrap();

            let window_clone = window.clone();
            move || {
                let _ = canvas
                    .remove_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mouseleave",
                    mouseleave_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
            }
        });
    }

    // Camera control callbacks.
    let redraw = {
        let draw_ref = draw_ref.clone();
        move || {
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
        }
    };
    let zoom_in = {
        let camera = camera.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            camera.borrow_mut().zoom_by(ZOOM_STEP);
            redraw();
        })
    };
    let zoom_out = {
        let camera = camera.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            camera.borrow_mut().zoom_by(-ZOOM_STEP);
            redraw();
        })
    };
    let pan_by = |dx: f64, dy: f64| {
        let camera = camera.clone();
        let canvas_ref = canvas_ref.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                let mut cam = camera.borrow_mut();
                let s = viewport_for(&canvas, &cam).px_per_degree();
                cam.center = GeoPoint {
                    lat: cam.center.lat + dy / s,
                    lon: cam.center.lon + dx / s,
                };
            }
            redraw();
        })
    };
    let recenter = {
        let camera = camera.clone();
        let redraw = redraw.clone();
        let center = props.center;
        let zoom = props.zoom;
        Callback::from(move |_| {
            camera.borrow_mut().jump_to(center, zoom);
            redraw();
        })
    };

    html! {
        <div style="position:absolute; inset:0; overflow:hidden;">
            <canvas ref={canvas_ref.clone()} id="map-canvas" style="display:block; width:100%; height:100%;"></canvas>
            <MapControls
                on_zoom_in={zoom_in}
                on_zoom_out={zoom_out}
                on_pan_left={pan_by(-PAN_STEP_PX, 0.0)}
                on_pan_right={pan_by(PAN_STEP_PX, 0.0)}
                on_pan_up={pan_by(0.0, PAN_STEP_PX)}
                on_pan_down={pan_by(0.0, -PAN_STEP_PX)}
                on_center={recenter}
            />
            { if let Some(m) = &*selected {
                html!{ <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; font-size:12px;">
                    <div style="display:flex; align-items:center; gap:6px;">
                        <span style={format!("display:inline-block; width:10px; height:10px; border-radius:5px; background:{};", m.category.color())}></span>
                        <span style="font-weight:600;">{ m.category.label() }</span>
                    </div>
                    <div>{ m.city.clone() }</div>
                    <div style="opacity:0.7;">{ format_latlon(m.position.lat, m.position.lon) }</div>
                </div> }
            } else { html!{} } }
        </div>
    }
}
