use crate::models::service::{OverallStatus, Service, ServiceStatus, SystemHealth, SystemStatus};

/// Derive overall health from a set of services.
///
/// Any outage wins over any degradation. Services in maintenance are neither
/// counted as operational nor treated as a fault. Returns `None` for an empty
/// set since the percentage has no meaning there.
pub fn aggregate(services: &[Service]) -> Option<SystemStatus> {
    if services.is_empty() {
        return None;
    }

    let mut operational = 0usize;
    let mut outages = 0usize;
    let mut degraded = 0usize;

    for service in services {
        match service.status {
            ServiceStatus::Operational => operational += 1,
            ServiceStatus::Degraded => degraded += 1,
            ServiceStatus::Outage => outages += 1,
            ServiceStatus::Maintenance => {}
        }
    }

    let status = if outages > 0 {
        OverallStatus::MajorOutage
    } else if degraded > 0 {
        OverallStatus::PartialOutage
    } else {
        OverallStatus::Operational
    };

    Some(SystemStatus {
        status,
        percentage: round_percentage(operational, services.len()),
    })
}

/// Health view for a possibly not-yet-fetched service set.
pub fn system_health(services: Option<&[Service]>) -> SystemHealth {
    match services {
        None => SystemHealth::Loading,
        Some(services) => aggregate(services).map_or(SystemHealth::Unknown, SystemHealth::Known),
    }
}

// round(100 * part / total), halves rounded up
fn round_percentage(part: usize, total: usize) -> u8 {
    ((200 * part + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services(statuses: &[ServiceStatus]) -> Vec<Service> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                Service::new(&(i + 1).to_string(), &format!("Service {}", i + 1), *status)
            })
            .collect()
    }

    #[test]
    fn test_outage_wins() {
        use ServiceStatus::*;

        let sets = [
            vec![Outage],
            vec![Operational, Outage, Degraded],
            vec![Degraded, Degraded, Outage, Maintenance],
        ];

        for set in sets {
            let status = aggregate(&services(&set)).unwrap();
            assert_eq!(status.status, OverallStatus::MajorOutage);
        }
    }

    #[test]
    fn test_degraded_without_outage() {
        use ServiceStatus::*;

        let status = aggregate(&services(&[Operational, Degraded, Maintenance])).unwrap();
        assert_eq!(status.status, OverallStatus::PartialOutage);
        assert_eq!(status.percentage, 33);
    }

    #[test]
    fn test_all_operational() {
        let status = aggregate(&services(&[ServiceStatus::Operational; 5])).unwrap();
        assert_eq!(status.status, OverallStatus::Operational);
        assert_eq!(status.percentage, 100);
    }

    #[test]
    fn test_sample_dashboard_services() {
        use ServiceStatus::*;

        let status = aggregate(&services(&[
            Operational,
            Operational,
            Outage,
            Degraded,
            Operational,
            Operational,
        ]))
        .unwrap();

        assert_eq!(status.status, OverallStatus::MajorOutage);
        assert_eq!(status.percentage, 67);
    }

    #[test]
    fn test_maintenance_is_uncounted() {
        use ServiceStatus::*;

        let status = aggregate(&services(&[Operational, Maintenance])).unwrap();
        assert_eq!(status.status, OverallStatus::Operational);
        assert_eq!(status.percentage, 50);

        let status = aggregate(&services(&[Maintenance, Maintenance])).unwrap();
        assert_eq!(status.status, OverallStatus::Operational);
        assert_eq!(status.percentage, 0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_percentage(1, 8), 13); // 12.5
        assert_eq!(round_percentage(1, 3), 33);
        assert_eq!(round_percentage(2, 3), 67);
        assert_eq!(round_percentage(0, 4), 0);
    }

    #[test]
    fn test_empty_and_loading_are_distinct() {
        assert_eq!(aggregate(&[]), None);
        assert_eq!(system_health(None), SystemHealth::Loading);
        assert_eq!(system_health(Some(&[][..])), SystemHealth::Unknown);

        let set = services(&[ServiceStatus::Operational]);
        assert!(matches!(
            system_health(Some(set.as_slice())),
            SystemHealth::Known(SystemStatus { percentage: 100, .. })
        ));
    }
}
