//! Checks against the catalog that ships inside the binary.

use galaxy_shared::catalog::Catalog;
use galaxy_shared::details::{Details, ProjectDetails};
use galaxy_shared::picking::{pick_nearest, Ray, Sphere};
use galaxy_shared::vec3::{sub, Vec3};

#[test]
fn bundled_catalog_is_valid_and_non_empty() {
    let catalog = Catalog::bundled().unwrap();
    assert!(!catalog.stars.is_empty());
    assert!(catalog.validate().is_ok());
}

#[test]
fn bundled_catalog_round_trips_through_json() {
    let catalog = Catalog::bundled().unwrap();
    let json = serde_json::to_string(&catalog).unwrap();
    assert_eq!(Catalog::from_json_str(&json).unwrap(), catalog);
}

#[test]
fn aiming_at_a_star_selects_it_and_shows_its_details() {
    let catalog = Catalog::bundled().unwrap();
    let camera = Vec3::new(0.0, 2.0, 18.0);
    let mut direct_hits = 0;

    for (i, star) in catalog.stars.iter().enumerate() {
        let ray = Ray::new(camera, sub(star.position(), camera));
        let spheres = catalog.stars.iter().map(|s| Sphere {
            center: s.position(),
            radius: 0.5 * s.scale,
        });
        let hit = pick_nearest(&ray, spheres).expect("ray aimed at a star must hit");
        // A closer star may occlude; the hit is never further than the aimed one.
        let hit_star = &catalog.stars[hit.index];
        if hit.index == i {
            direct_hits += 1;
            let details = Details::Project(ProjectDetails::from_star(hit_star));
            assert_eq!(details.title(), star.name);
            assert_eq!(details.link().map(|(_, url)| url), Some(star.url.as_str()));
        }
    }
    assert!(direct_hits > 0);
}
