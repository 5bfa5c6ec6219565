#[cfg(test)]
mod tests {
    use quickcheck::{QuickCheck, TestResult};

    use crate::Error;
    use crate::cluster::{
        Cluster, DbscanParams, Label, Membership, Memberships, Metric, Point, db_scan,
        db_scan_with, distance_planar, expand_cluster, region_query,
    };

    fn planar(eps: f64, min_points: usize) -> DbscanParams {
        DbscanParams::new(eps, min_points, Metric::Planar)
    }

    fn on_x_axis(xs: &[f64]) -> Vec<Point> {
        xs.iter().map(|&x| Point::new(x, 0.0)).collect()
    }

    #[test]
    fn test_region_query_is_inclusive() {
        let points = on_x_axis(&[0.0, 1.0, 2.0, 0.5]);
        assert_eq!(
            region_query(&points, &points[0], 1.0, &Metric::Planar),
            vec![0, 1, 3]
        );
        assert_eq!(
            region_query(&points, &points[2], 0.5, &Metric::Planar),
            vec![2]
        );
        // The query point itself is found at distance zero
        assert_eq!(
            region_query(&points, &points[1], 1e-9, &distance_planar),
            vec![1]
        );
    }

    #[test]
    fn test_dbscan_square_with_center() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.5, 0.5),
        ];
        let clustering = db_scan(&points, &planar(1.5, 3)).unwrap();

        assert_eq!(clustering.cluster_count(), 1);
        assert_eq!(clustering.label_codes(), vec![1, 1, 1, 1, 1]);
        assert!(clustering.noise().is_empty());

        let hulls = clustering.hulls(&points);
        assert_eq!(hulls.len(), 1);
        assert_eq!(hulls[0].c, 1);
        assert_eq!(
            hulls[0].vertices,
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_dbscan_two_distant_pairs() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.1),
            Point::new(100.0, 100.0),
            Point::new(100.0, 100.1),
        ];
        let clustering = db_scan(&points, &planar(1.0, 2)).unwrap();

        assert_eq!(clustering.label_codes(), vec![1, 1, 2, 2]);
        assert_eq!(
            clustering.clusters(),
            vec![
                Cluster {
                    c: 1,
                    points: vec![0, 1]
                },
                Cluster {
                    c: 2,
                    points: vec![2, 3]
                },
            ]
        );

        let hulls = clustering.hulls(&points);
        assert_eq!(hulls[0].vertices, vec![points[0], points[1]]);
        assert_eq!(hulls[1].vertices, vec![points[2], points[3]]);
    }

    #[test]
    fn test_dbscan_isolated_point_is_noise() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.5),
            Point::new(10.0, 10.0),
        ];
        let clustering = db_scan(&points, &planar(1.0, 2)).unwrap();

        assert_eq!(clustering.label(2), Label::Noise);
        assert_eq!(clustering.label_codes(), vec![1, 1, 0]);
        assert_eq!(clustering.noise(), vec![2]);

        let hulls = clustering.hulls(&points);
        assert_eq!(hulls.len(), 1);
        assert!(!hulls[0].vertices.contains(&points[2]));
    }

    #[test]
    fn test_dbscan_noise_promoted_to_border() {
        // 0.0 has only one neighbour, so it is noise until the core point 1.0
        // expands over it
        let points = on_x_axis(&[0.0, 1.0, 2.0]);
        let clustering = db_scan(&points, &planar(1.0, 3)).unwrap();

        assert_eq!(
            clustering.labels(),
            &[Label::Cluster(1), Label::Cluster(1), Label::Cluster(1)]
        );
        assert!(clustering.noise().is_empty());
    }

    #[test]
    fn test_dbscan_shared_border_goes_to_first_cluster() {
        // Two dense groups with a border point at 0.0 reachable from both
        // cores (-1.0 and 1.0), but not dense itself.
        let params = planar(1.0, 4);

        let left_first = on_x_axis(&[0.0, -2.0, -1.5, -1.0, 1.0, 1.5, 2.0]);
        let clustering = db_scan(&left_first, &params).unwrap();
        assert_eq!(clustering.label_codes(), vec![1, 1, 1, 1, 2, 2, 2]);

        let right_first = on_x_axis(&[0.0, 1.0, 1.5, 2.0, -2.0, -1.5, -1.0]);
        let clustering = db_scan(&right_first, &params).unwrap();
        assert_eq!(clustering.label_codes(), vec![1, 1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_dbscan_great_circle() {
        // (latitude, longitude); eps in meters
        let points = vec![
            Point::new(59.955982, 30.244759),
            Point::new(59.955975, 30.24472),
            Point::new(59.96698, 30.244358),
            Point::new(59.951557, 30.258387),
            Point::new(60.029499, 30.434124),
        ];

        let clustering =
            db_scan(&points, &DbscanParams::new(1000.0, 2, Metric::GreatCircle)).unwrap();
        assert_eq!(clustering.label_codes(), vec![1, 1, 0, 1, 0]);

        let clustering =
            db_scan(&points, &DbscanParams::new(300.0, 2, Metric::GreatCircle)).unwrap();
        assert_eq!(clustering.label_codes(), vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_dbscan_custom_distance() {
        let chebyshev = |a: &Point, b: &Point| (a.x() - b.x()).abs().max((a.y() - b.y()).abs());
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(5.0, 5.0),
        ];
        // Diagonal neighbours are 1.0 apart under Chebyshev, ~1.414 under Euclid
        let clustering = db_scan_with(&points, &planar(1.0, 2), &chebyshev).unwrap();
        assert_eq!(clustering.label_codes(), vec![1, 1, 0]);

        let clustering = db_scan(&points, &planar(1.0, 2)).unwrap();
        assert_eq!(clustering.label_codes(), vec![0, 0, 0]);
    }

    #[test]
    fn test_dbscan_min_points_one() {
        let points = on_x_axis(&[0.0, 10.0, 20.0]);
        let clustering = db_scan(&points, &planar(1.0, 1)).unwrap();
        assert_eq!(clustering.label_codes(), vec![1, 2, 3]);
        assert_eq!(clustering.cluster_count(), 3);
    }

    #[test]
    fn test_dbscan_empty_input() {
        let clustering = db_scan(&[], &planar(1.0, 2)).unwrap();
        assert_eq!(clustering.cluster_count(), 0);
        assert!(clustering.labels().is_empty());
        assert!(clustering.clusters().is_empty());
        assert!(clustering.hulls(&[]).is_empty());
    }

    #[test]
    fn test_dbscan_rejects_invalid_parameters() {
        let points = on_x_axis(&[0.0, 1.0]);

        for eps in [0.0, -1.0, f64::NAN] {
            match db_scan(&points, &planar(eps, 2)) {
                Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, "eps"),
                other => panic!("eps={} should be rejected, got {:?}", eps, other),
            }
        }

        match db_scan(&points, &planar(1.0, 0)) {
            Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, "min_points"),
            other => panic!("min_points=0 should be rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_dbscan_point_cap() {
        let points = on_x_axis(&[0.0, 1.0, 2.0]);

        let capped = planar(1.0, 2).with_max_points(Some(2));
        match db_scan(&points, &capped) {
            Err(Error::TooManyPoints { count, limit }) => {
                assert_eq!(count, 3);
                assert_eq!(limit, 2);
            }
            other => panic!("expected TooManyPoints, got {:?}", other),
        }

        assert!(db_scan(&points, &planar(1.0, 2).with_max_points(Some(3))).is_ok());
        assert!(db_scan(&points, &planar(1.0, 2).with_max_points(None)).is_ok());
    }

    #[test]
    fn test_memberships_claim() {
        let mut memberships = Memberships::new(3);
        assert_eq!(memberships.len(), 3);
        assert_eq!(memberships.get(0), Membership::default());

        assert!(memberships.visit(0));
        assert!(!memberships.visit(0));
        assert!(memberships.is_visited(0));

        memberships.mark_noise(0);
        assert_eq!(memberships.label(0), Label::Noise);
        assert!(memberships.claim(0, 1));
        assert_eq!(memberships.label(0), Label::Cluster(1));

        // Cluster membership is never handed over
        assert!(!memberships.claim(0, 2));
        memberships.mark_noise(0);
        assert_eq!(
            memberships.get(0),
            Membership {
                visited: true,
                label: Label::Cluster(1)
            }
        );
    }

    #[test]
    fn test_expand_cluster_tolerates_duplicate_seeds() {
        let points = on_x_axis(&[0.0, 0.5, 1.0, 5.0]);
        let mut memberships = Memberships::new(points.len());
        memberships.visit(0);
        memberships.claim(0, 1);

        let dequeued = expand_cluster(
            &points,
            &mut memberships,
            vec![0, 1, 1, 2, 0, 2],
            1,
            1.0,
            2,
            &Metric::Planar,
        );
        assert_eq!(dequeued, 3);

        for i in 0..3 {
            assert_eq!(
                memberships.get(i),
                Membership {
                    visited: true,
                    label: Label::Cluster(1)
                }
            );
        }
        assert_eq!(memberships.get(3), Membership::default());
    }

    #[test]
    fn test_expand_cluster_queues_each_point_once() {
        // Every point of a dense grid is a core point whose neighbourhood
        // covers the whole grid
        let points: Vec<Point> = (0..30)
            .flat_map(|x| (0..30).map(move |y| Point::new(x as f64, y as f64)))
            .collect();
        let n = points.len();

        let mut memberships = Memberships::new(n);
        memberships.visit(0);
        memberships.claim(0, 1);
        let seeds = region_query(&points, &points[0], 100.0, &Metric::Planar);

        let dequeued = expand_cluster(
            &points,
            &mut memberships,
            seeds,
            1,
            100.0,
            2,
            &Metric::Planar,
        );

        assert_eq!(dequeued, n);
        assert!((0..n).all(|i| memberships.label(i) == Label::Cluster(1)));

        let clustering = db_scan(&points, &planar(100.0, 2)).unwrap();
        assert_eq!(clustering.cluster_count(), 1);
        assert!(clustering.noise().is_empty());
    }

    #[test]
    fn test_dbscan_properties() {
        fn prop(coords: Vec<(i8, i8)>, eps: u8, min_points: u8) -> TestResult {
            let points: Vec<Point> = coords
                .into_iter()
                .map(|(x, y)| Point::new(x as f64, y as f64))
                .collect();
            let params = planar((eps % 20) as f64 + 1.0, (min_points % 6) as usize + 1);

            let first = match db_scan(&points, &params) {
                Ok(clustering) => clustering,
                Err(_) => return TestResult::failed(),
            };

            // Deterministic for a fixed input order
            match db_scan(&points, &params) {
                Ok(second) if second == first => {}
                _ => return TestResult::failed(),
            }

            // Every point ends up as noise or in a cluster
            if first.labels().iter().any(|l| *l == Label::Unassigned) {
                return TestResult::failed();
            }

            let neighbours = |p: &Point| region_query(&points, p, params.eps, &Metric::Planar);
            let is_core: Vec<bool> = points
                .iter()
                .map(|p| neighbours(p).len() >= params.min_points)
                .collect();

            // Cluster ids are contiguous from 1 and every cluster holds a core point
            for cluster in first.clusters() {
                if !cluster.points.iter().any(|&i| is_core[i]) {
                    return TestResult::failed();
                }
            }

            // Noise points have no core point within eps
            for i in first.noise() {
                if neighbours(&points[i]).into_iter().any(|j| is_core[j]) {
                    return TestResult::failed();
                }
            }

            TestResult::passed()
        }

        QuickCheck::new()
            .tests(200)
            .quickcheck(prop as fn(Vec<(i8, i8)>, u8, u8) -> TestResult);
    }
}
