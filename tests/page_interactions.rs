//! Integration tests for a page session: rotations, observers, menu and lightbox

use std::sync::{Arc, Mutex};
use std::time::Duration;

use aesthetic_tile::atile_app::observer::scroll_to_hash;
use aesthetic_tile::atile_app::{ClickTarget, Rect, Settings, Testimonial, Viewport};
use aesthetic_tile::atile_core::GalleryItem;
use aesthetic_tile::atile_relay::test_utils::ScriptedRelay;
use aesthetic_tile::Site;

fn site_with(viewport: Viewport) -> Site<ScriptedRelay> {
    Site::with_relay(Settings::default(), ScriptedRelay::accepting(), viewport)
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial::new("Beautiful bathroom remodel.", "Sarah M."),
        Testimonial::new("On time and spotless.", "Dan K.").with_title("Homeowner"),
        Testimonial::new("Our backsplash is stunning.", "Priya R."),
        Testimonial::new("Would hire again.", "Tom W."),
    ]
}

#[tokio::test(start_paused = true)]
async fn test_testimonials_rotate_and_pause_on_manual_navigation() {
    let site = site_with(Viewport::new(1280.0, 800.0, 4000.0));
    let carousel = site.testimonials(testimonials()).unwrap();

    assert_eq!(carousel.active_index(), 0);
    assert_eq!(carousel.visible_window(1280.0).len(), 3);

    tokio::time::sleep(Duration::from_secs(8)).await;
    settle().await;
    assert_eq!(carousel.active_index(), 1);

    carousel.go_to(3).unwrap();
    settle().await;
    assert_eq!(carousel.active_index(), 3);
    assert!(!carousel.is_auto_advancing());

    // Paused for the whole cooldown
    tokio::time::sleep(Duration::from_secs(14)).await;
    assert_eq!(carousel.active_index(), 3);

    tokio::time::sleep(Duration::from_secs(1)).await;
    settle().await;
    assert!(carousel.is_auto_advancing());

    tokio::time::sleep(Duration::from_secs(8)).await;
    settle().await;
    assert_eq!(carousel.active_index(), 0);
    assert_eq!(carousel.dots(), vec![true, false, false, false]);
}

#[tokio::test(start_paused = true)]
async fn test_kitchen_tabs_cycle_and_select() {
    let site = site_with(Viewport::default());
    let tabs = site.kitchen_tabs().unwrap();

    assert!(tabs.is_active(&"materials"));

    tokio::time::sleep(Duration::from_secs(8)).await;
    settle().await;
    assert!(tabs.is_active(&"styles"));

    assert!(tabs.select(&"layouts").unwrap());
    assert!(!tabs.select(&"pricing").unwrap());
    settle().await;
    assert!(tabs.is_active(&"layouts"));

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(tabs.is_active(&"layouts"));
}

#[tokio::test]
async fn test_observers_track_scroll_and_unregister_on_drop() {
    let viewport = Viewport::new(1280.0, 800.0, 4000.0);
    let site = site_with(viewport.clone());

    let shadow = site.scroll_shadow();
    let back_to_top = site.back_to_top();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let reveal = site.reveal_observer(move |entry| {
        sink.lock()
            .unwrap()
            .push((entry.target.to_string(), entry.is_intersecting));
    });
    viewport.place_element("services", Rect::new(0.0, 1000.0, 1280.0, 200.0));
    reveal.observe("services");

    assert!(!shadow.has_shadow());
    assert!(!back_to_top.is_visible());

    viewport.scroll_to(100.0);
    assert!(!shadow.has_shadow());

    viewport.scroll_to(500.0);
    assert!(shadow.has_shadow());

    viewport.scroll_to(3000.0);
    assert!(back_to_top.is_visible());

    back_to_top.activate();
    assert_eq!(viewport.scroll_y(), 0.0);
    assert!(!shadow.has_shadow());
    assert!(!back_to_top.is_visible());

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            ("services".to_string(), false),
            ("services".to_string(), true),
            ("services".to_string(), false),
        ]
    );

    assert_eq!(viewport.listener_count(), 3);
    assert_eq!(viewport.observer_count(), 1);

    drop(shadow);
    drop(back_to_top);
    drop(reveal);

    assert_eq!(viewport.listener_count(), 0);
    assert_eq!(viewport.observer_count(), 0);
}

#[test]
fn test_anchor_scroll_lands_below_header() {
    let viewport = Viewport::new(1280.0, 800.0, 4000.0);
    viewport.place_element("contact", Rect::new(0.0, 2000.0, 1280.0, 600.0));

    assert_eq!(scroll_to_hash(&viewport, "#contact", 80.0), Some(1920.0));
    assert_eq!(scroll_to_hash(&viewport, "#missing", 80.0), None);
    assert_eq!(viewport.scroll_y(), 1920.0);
}

#[test]
fn test_menu_navigation_releases_scroll_lock() {
    let site = site_with(Viewport::default());
    let mut menu = site.mobile_menu();

    menu.toggle().unwrap();
    assert!(site.scroll_lock().is_locked());

    let active = menu.navigate("/bathroom-shower");
    assert!(!site.scroll_lock().is_locked());
    assert!(active.services_group);
    assert!(active.is_service_active("/bathroom-shower"));
    assert!(!active.is_primary_active("/"));

    let home = site.navigation("/");
    assert!(home.is_primary_active("/"));
    assert!(!home.services_group);
}

#[test]
fn test_gallery_lightbox_single_selection() {
    let site = site_with(Viewport::default());
    let mut lightbox = site.lightbox();

    lightbox.select(GalleryItem::new("/gallery/1.jpg", "Marble shower"));
    lightbox.select(GalleryItem::new("/gallery/2.jpg", "Herringbone floor"));
    assert_eq!(lightbox.selected().map(|i| i.alt.as_str()), Some("Herringbone floor"));

    assert!(!lightbox.handle_click(ClickTarget::Content));
    assert!(lightbox.handle_click(ClickTarget::Backdrop));
    assert!(!lightbox.is_open());
    assert!(!site.scroll_lock().is_locked());
}
