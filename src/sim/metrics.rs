use average::{Estimate, Mean};

use crate::core::Process;

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

pub fn average_turnaround(procs: &[Process]) -> f64 {
    avg(procs.iter().map(|p| p.turnaround as f64))
}

pub fn average_waiting(procs: &[Process]) -> f64 {
    avg(procs.iter().map(|p| p.waiting as f64))
}

/// Mean time to first dispatch; processes never dispatched are skipped.
pub fn average_response(procs: &[Process]) -> f64 {
    avg(procs
        .iter()
        .filter_map(|p| p.response.map(|r| r as f64)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_over_completed_set() {
        let mut a = Process::new(1, 0, 4, 1);
        a.waiting = 2;
        a.turnaround = 6;
        a.response = Some(2);
        let mut b = Process::new(2, 1, 6, 1);
        b.waiting = 4;
        b.turnaround = 10;
        b.response = Some(4);
        let procs = vec![a, b];
        assert!((average_waiting(&procs) - 3.0).abs() < 1e-12);
        assert!((average_turnaround(&procs) - 8.0).abs() < 1e-12);
        assert!((average_response(&procs) - 3.0).abs() < 1e-12);
    }
}
