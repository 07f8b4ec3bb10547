// Copyright @yucwang 2026

use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

const SAH_BUCKETS: usize = 12;

#[derive(Clone)]
struct BVHNode {
    bounds: AABB,
    left: Option<usize>,
    right: Option<usize>,
    start: usize,
    count: usize,
}

impl BVHNode {
    fn leaf(bounds: AABB, start: usize, count: usize) -> Self {
        Self { bounds, left: None, right: None, start, count }
    }

    fn interior(bounds: AABB, left: usize, right: usize) -> Self {
        Self { bounds, left: Some(left), right: Some(right), start: 0, count: 0 }
    }

    fn is_leaf(&self) -> bool {
        self.count > 0
    }
}

pub struct BVH {
    nodes: Vec<BVHNode>,
    indices: Vec<usize>,
    prim_bounds: Vec<AABB>,
    prim_centroids: Vec<Vector3f>,
    max_leaf_size: usize,
}

impl BVH {
    pub fn new(prim_bounds: Vec<AABB>, prim_centroids: Vec<Vector3f>) -> Self {
        Self::with_max_leaf_size(prim_bounds, prim_centroids, 4)
    }

    pub fn with_max_leaf_size(
        prim_bounds: Vec<AABB>,
        prim_centroids: Vec<Vector3f>,
        max_leaf_size: usize,
    ) -> Self {
        let mut bvh = Self {
            indices: (0..prim_bounds.len()).collect(),
            nodes: Vec::new(),
            prim_bounds,
            prim_centroids,
            max_leaf_size: max_leaf_size.max(1),
        };

        if !bvh.indices.is_empty() {
            let (bounds, centroid_bounds) = bvh.compute_bounds(0, bvh.indices.len());
            bvh.build(0, bvh.indices.len(), bounds, centroid_bounds);
        }

        bvh
    }

    /// Closest hit reported by `hit_fn`. The ray handed to the callback has
    /// its `max_t` clipped to the nearest hit found so far.
    pub fn ray_intersection<F, T>(&self, ray: &Ray3f, mut hit_fn: F) -> Option<(usize, T)>
    where
        F: FnMut(usize, &Ray3f) -> Option<(T, Float)>,
    {
        if self.nodes.is_empty() {
            return None;
        }

        let mut ray = *ray;
        let mut closest: Option<(usize, T)> = None;
        let mut stack = vec![0usize];

        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];
            if !node.bounds.ray_intersect(&ray) {
                continue;
            }

            if node.is_leaf() {
                for &prim_idx in &self.indices[node.start..node.start + node.count] {
                    if let Some((hit, t)) = hit_fn(prim_idx, &ray) {
                        if ray.update(t) {
                            closest = Some((prim_idx, hit));
                        }
                    }
                }
            } else {
                if let Some(left) = node.left {
                    stack.push(left);
                }
                if let Some(right) = node.right {
                    stack.push(right);
                }
            }
        }

        closest
    }

    /// Returns as soon as any primitive reports a hit.
    pub fn ray_intersection_t<F>(&self, ray: &Ray3f, mut hit_fn: F) -> bool
    where
        F: FnMut(usize, &Ray3f) -> bool,
    {
        if self.nodes.is_empty() {
            return false;
        }

        let mut stack = vec![0usize];
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];
            if !node.bounds.ray_intersect(ray) {
                continue;
            }
            if node.is_leaf() {
                let leaf = &self.indices[node.start..node.start + node.count];
                if leaf.iter().any(|&prim_idx| hit_fn(prim_idx, ray)) {
                    return true;
                }
            } else {
                if let Some(left) = node.left {
                    stack.push(left);
                }
                if let Some(right) = node.right {
                    stack.push(right);
                }
            }
        }

        false
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn bounds(&self) -> AABB {
        self.nodes.first().map(|node| node.bounds).unwrap_or_default()
    }

    fn build(&mut self, start: usize, end: usize, bounds: AABB, centroid_bounds: AABB) -> usize {
        let count = end - start;
        if count <= self.max_leaf_size {
            let node_idx = self.nodes.len();
            self.nodes.push(BVHNode::leaf(bounds, start, count));
            return node_idx;
        }

        let axis = centroid_bounds.max_extent();
        let axis_min = centroid_bounds.p_min[axis];
        let axis_max = centroid_bounds.p_max[axis];
        if (axis_max - axis_min).abs() < 1e-6 {
            let node_idx = self.nodes.len();
            self.nodes.push(BVHNode::leaf(bounds, start, count));
            return node_idx;
        }

        // SAH with fixed buckets along the split axis.
        let mut buckets = vec![(0usize, AABB::default()); SAH_BUCKETS];
        for i in start..end {
            let idx = self.indices[i];
            let c = self.prim_centroids[idx][axis];
            let mut b = ((c - axis_min) / (axis_max - axis_min) * SAH_BUCKETS as Float) as usize;
            if b >= SAH_BUCKETS {
                b = SAH_BUCKETS - 1;
            }
            buckets[b].0 += 1;
            let mut bnd = buckets[b].1;
            bnd.expand_by_aabb(&self.prim_bounds[idx]);
            buckets[b].1 = bnd;
        }

        let mut cost = [0.0f32; SAH_BUCKETS - 1];
        for i in 0..(SAH_BUCKETS - 1) {
            let mut b0 = AABB::default();
            let mut b1 = AABB::default();
            let mut count0 = 0usize;
            let mut count1 = 0usize;
            for b in 0..=i {
                count0 += buckets[b].0;
                b0.expand_by_aabb(&buckets[b].1);
            }
            for b in (i + 1)..SAH_BUCKETS {
                count1 += buckets[b].0;
                b1.expand_by_aabb(&buckets[b].1);
            }
            let area = bounds.surface_area().max(1e-6);
            let cost0 = if count0 > 0 {
                (count0 as Float) * b0.surface_area()
            } else {
                0.0
            };
            let cost1 = if count1 > 0 {
                (count1 as Float) * b1.surface_area()
            } else {
                0.0
            };
            cost[i] = 1.0 + (cost0 + cost1) / area;
        }

        let mut min_cost = cost[0];
        let mut min_split = 0usize;
        for i in 1..cost.len() {
            if cost[i] < min_cost {
                min_cost = cost[i];
                min_split = i;
            }
        }

        // If SAH says leaf is cheaper, stop splitting.
        let leaf_cost = count as Float;
        if min_cost >= leaf_cost {
            let node_idx = self.nodes.len();
            self.nodes.push(BVHNode::leaf(bounds, start, count));
            return node_idx;
        }

        // Partition indices in-place by bucket.
        let mut mid = start;
        let mut i = start;
        while i < end {
            let idx = self.indices[i];
            let c = self.prim_centroids[idx][axis];
            let mut b = ((c - axis_min) / (axis_max - axis_min) * SAH_BUCKETS as Float) as usize;
            if b >= SAH_BUCKETS {
                b = SAH_BUCKETS - 1;
            }
            if b <= min_split {
                self.indices.swap(i, mid);
                mid += 1;
            }
            i += 1;
        }

        if mid == start || mid == end {
            // Partition failed: create a leaf.
            let node_idx = self.nodes.len();
            self.nodes.push(BVHNode::leaf(bounds, start, count));
            return node_idx;
        }

        let (left_bounds, left_centroids) = self.compute_bounds(start, mid);
        let (right_bounds, right_centroids) = self.compute_bounds(mid, end);
        let node_idx = self.nodes.len();
        self.nodes.push(BVHNode::leaf(bounds, 0, 0));
        let left = self.build(start, mid, left_bounds, left_centroids);
        let right = self.build(mid, end, right_bounds, right_centroids);
        self.nodes[node_idx] = BVHNode::interior(bounds, left, right);
        node_idx
    }

    fn compute_bounds(&self, start: usize, end: usize) -> (AABB, AABB) {
        let mut bounds = AABB::default();
        let mut centroid_bounds = AABB::default();
        for i in start..end {
            let idx = self.indices[i];
            bounds.expand_by_aabb(&self.prim_bounds[idx]);
            centroid_bounds.expand_by_point(&self.prim_centroids[idx]);
        }
        (bounds, centroid_bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::BVH;
    use crate::core::shape::Shape;
    use crate::math::constants::{ Float, Vector3f };
    use crate::math::ray::Ray3f;
    use crate::shapes::sphere::Sphere;

    // A 5x5 grid of small spheres in the z = 0 plane, plus one behind it.
    fn build_spheres() -> Vec<Sphere> {
        let mut spheres = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                let c = Vector3f::new(i as Float * 2.0, j as Float * 2.0, 0.0);
                spheres.push(Sphere::new(c, 0.5));
            }
        }
        spheres.push(Sphere::new(Vector3f::new(0.0, 0.0, -4.0), 1.0));
        spheres
    }

    fn build_bvh(spheres: &[Sphere]) -> BVH {
        let prim_bounds: Vec<_> = spheres.iter().map(|s| s.bounding_box()).collect();
        let prim_centroids = prim_bounds.iter().map(|b| b.center()).collect();
        BVH::with_max_leaf_size(prim_bounds, prim_centroids, 2)
    }

    fn naive_closest(spheres: &[Sphere], ray: &Ray3f) -> Option<(usize, Float)> {
        let mut best: Option<(usize, Float)> = None;
        for (idx, sphere) in spheres.iter().enumerate() {
            if let Some(hit) = sphere.ray_intersection(ray) {
                if best.map_or(true, |(_, t)| hit.t() < t) {
                    best = Some((idx, hit.t()));
                }
            }
        }
        best
    }

    #[test]
    fn test_bvh_vs_naive_spheres() {
        let spheres = build_spheres();
        let bvh = build_bvh(&spheres);
        assert_eq!(bvh.len(), spheres.len());

        let origins = [
            Vector3f::new(0.1, 0.1, 5.0),
            Vector3f::new(4.2, 6.1, 5.0),
            Vector3f::new(8.0, 8.0, 5.0),
            Vector3f::new(-3.0, 4.0, 0.0),
        ];
        let dirs = [
            Vector3f::new(0.0, 0.0, -1.0),
            Vector3f::new(0.0, 0.0, -1.0),
            Vector3f::new(-1.0, -1.0, -1.0),
            Vector3f::new(1.0, 0.0, 0.0),
        ];

        for (o, d) in origins.iter().zip(dirs.iter()) {
            let ray = Ray3f::new(*o, *d, None, None);
            let bvh_hit = bvh.ray_intersection(&ray, |prim_idx, ray| {
                spheres[prim_idx].ray_intersection(ray).map(|h| (h.t(), h.t()))
            });
            let naive = naive_closest(&spheres, &ray);

            assert_eq!(bvh_hit.map(|(idx, _)| idx), naive.map(|(idx, _)| idx));
            if let (Some((_, bvh_t)), Some((_, naive_t))) = (bvh_hit, naive) {
                assert!((bvh_t - naive_t).abs() < 1e-5);
            }

            let any = bvh.ray_intersection_t(&ray, |prim_idx, ray| spheres[prim_idx].ray_intersection_t(ray));
            assert_eq!(any, naive.is_some());
        }

        let miss_ray = Ray3f::new(Vector3f::new(100.0, 100.0, 1.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let bvh_miss = bvh.ray_intersection(&miss_ray, |prim_idx, ray| {
            spheres[prim_idx].ray_intersection(ray).map(|h| (h.t(), h.t()))
        });
        assert!(bvh_miss.is_none());
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = BVH::new(Vec::new(), Vec::new());
        assert!(bvh.is_empty());
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert!(bvh.ray_intersection(&ray, |_, _| Some(((), 1.0))).is_none());
        assert!(!bvh.ray_intersection_t(&ray, |_, _| true));
    }
}
