use num::Float;

/// Dense vector operations over a slice of floats.
///
/// TF-IDF vectors are short (one component per template term) and mostly
/// non-zero once normalized, so they are kept dense.
pub trait DenseVecOps<N>
where
    N: Float,
{
    /// Dot product
    /// d(a, b) = Σ(a_i * b_i)
    ///
    /// Components beyond the shorter vector are ignored.
    fn dot(&self, other: &Self) -> N;

    /// Σ(a_i^2)
    fn norm_sq(&self) -> N;

    /// Euclidean norm ||a|| = sqrt(Σ(a_i^2))
    #[inline]
    fn norm(&self) -> N {
        self.norm_sq().sqrt()
    }

    /// Divide every component by the Euclidean norm.
    /// A zero vector is left unchanged.
    fn l2_normalize(&mut self);
}

impl<N> DenseVecOps<N> for [N]
where
    N: Float,
{
    #[inline]
    fn dot(&self, other: &Self) -> N {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );
        self.iter()
            .zip(other.iter())
            .fold(N::zero(), |acc, (&a, &b)| acc + a * b)
    }

    #[inline]
    fn norm_sq(&self) -> N {
        self.iter().fold(N::zero(), |acc, &v| acc + v * v)
    }

    fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm.is_zero() || !norm.is_finite() {
            return;
        }
        for v in self.iter_mut() {
            *v = *v / norm;
        }
    }
}

/// Cosine similarity
/// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b|| + ε)
///
/// `epsilon` keeps the result finite when either vector is all zeros, in
/// which case the similarity is 0.
#[inline]
pub fn cosine_similarity<N>(a: &[N], b: &[N], epsilon: N) -> N
where
    N: Float,
{
    a.dot(b) / (a.norm() * b.norm() + epsilon)
}
