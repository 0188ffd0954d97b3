//! Cache key namespace.
//!
//! Every cached artifact lives under a prefix identifying its entity kind.
//! Prefixes must never collide across kinds — the tests below pin that down.
//! The formats match the wire keys existing deployments already have in
//! Redis, so a rolling upgrade keeps its warm cache.

/// Top job recommendations for a CV.
pub fn cv_recommendations(cv_id: i32) -> String {
    format!("recommend:cv:{cv_id}")
}

/// Top CV recommendations for a job.
pub fn job_recommendations(job_id: i32) -> String {
    format!("recommend:job:{job_id}")
}

/// Full analysis result for a CV (scores + explanations + timestamps).
pub fn cv_analysis(cv_id: i32) -> String {
    format!("nli_analysis:cv:{cv_id}")
}

/// Jobs similar to a given job.
pub fn related_jobs(job_id: i32) -> String {
    format!("related_jobs:{job_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formats() {
        assert_eq!(cv_recommendations(42), "recommend:cv:42");
        assert_eq!(job_recommendations(42), "recommend:job:42");
        assert_eq!(cv_analysis(42), "nli_analysis:cv:42");
        assert_eq!(related_jobs(42), "related_jobs:42");
    }

    #[test]
    fn test_namespaces_never_collide() {
        // Same numeric id across every entity kind must yield distinct keys.
        let keys = [
            cv_recommendations(7),
            job_recommendations(7),
            cv_analysis(7),
            related_jobs(7),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_cv_and_job_sides_distinct_for_same_id() {
        // A CV and a job can share an id; their recommendation entries must not.
        assert_ne!(cv_recommendations(1), job_recommendations(1));
    }
}
