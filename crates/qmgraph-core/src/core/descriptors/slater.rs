use super::oracle::{AtomSite, DescriptorError, DescriptorOracle, DescriptorSet, OrbitalSlice};
use nalgebra::DMatrix;

/// A deterministic analytic surrogate for a quantum-chemistry backend.
///
/// Orbital counts follow a minimal basis (one orbital for H/He, five through
/// Ne, nine through Ar); off-diagonal matrix elements decay exponentially with
/// the interatomic distance, damped by the orbital positions within each
/// atom's shell. The numbers are structurally faithful (correct shapes,
/// symmetry, orbital layout) but carry no chemical accuracy; real SCF
/// backends plug in through [`DescriptorOracle`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SlaterOverlapOracle;

fn orbital_count(atomic_number: u32) -> Option<usize> {
    match atomic_number {
        1..=2 => Some(1),
        3..=10 => Some(5),
        11..=18 => Some(9),
        _ => None,
    }
}

impl DescriptorOracle for SlaterOverlapOracle {
    fn compute(&self, sites: &[AtomSite]) -> Result<DescriptorSet, DescriptorError> {
        let mut orbital_slices = Vec::with_capacity(sites.len());
        let mut total = 0;
        for site in sites {
            let count = orbital_count(site.atomic_number).ok_or(
                DescriptorError::UnsupportedElement {
                    atomic_number: site.atomic_number,
                },
            )?;
            orbital_slices.push(OrbitalSlice {
                start: total,
                end: total + count,
            });
            total += count;
        }

        let mut overlap = DMatrix::zeros(total, total);
        let mut core_hamiltonian = DMatrix::zeros(total, total);

        for (a, site_a) in sites.iter().enumerate() {
            let slice_a = orbital_slices[a];
            for (b, site_b) in sites.iter().enumerate() {
                let slice_b = orbital_slices[b];
                let distance = (site_a.position - site_b.position).norm();
                let charge = f64::from(site_a.atomic_number + site_b.atomic_number) / 2.0;

                for (p, i) in (slice_a.start..slice_a.end).enumerate() {
                    for (q, j) in (slice_b.start..slice_b.end).enumerate() {
                        // Shell damping is symmetric in (p, q), so both
                        // triangles come out identical by construction.
                        let damping = ((1 + p) * (1 + q)) as f64;
                        let s = if i == j {
                            1.0
                        } else {
                            (-distance).exp() / damping
                        };
                        overlap[(i, j)] = s;
                        core_hamiltonian[(i, j)] = if i == j {
                            -0.5 * f64::from(site_a.atomic_number) / damping
                        } else {
                            -charge * s
                        };
                    }
                }
            }
        }

        Ok(DescriptorSet {
            overlap,
            core_hamiltonian,
            orbital_slices,
        })
    }
}
