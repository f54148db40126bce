use crate::model::{Classification, Ticket, TicketStats};

/// One-line summary: `#id [status] category/priority title`
pub fn format_ticket_line(ticket: &Ticket) -> String {
    format!(
        "#{} [{}] {}/{} {}",
        ticket.id, ticket.status, ticket.category, ticket.priority, ticket.title
    )
}

/// Multi-line view of a single ticket
pub fn format_ticket_detail(ticket: &Ticket) -> Vec<String> {
    let mut lines = vec![
        format!("#{} {}", ticket.id, ticket.title),
        format!("status: {}", ticket.status.label()),
        format!("category: {}", ticket.category.label()),
        format!("priority: {}", ticket.priority.label()),
        format!("created: {}", ticket.created_at.format("%Y-%m-%d %H:%M")),
    ];
    if let Some(updated) = ticket.updated_at {
        lines.push(format!("updated: {}", updated.format("%Y-%m-%d %H:%M")));
    }
    lines.push("description:".to_string());
    for line in ticket.description.lines() {
        lines.push(format!("  {}", line));
    }
    lines
}

pub fn format_stats(stats: &TicketStats) -> Vec<String> {
    let priorities = stats
        .priority_breakdown
        .entries()
        .iter()
        .map(|(p, n)| format!("{} {}", p, n))
        .collect::<Vec<_>>()
        .join(", ");
    let categories = stats
        .category_breakdown
        .entries()
        .iter()
        .map(|(c, n)| format!("{} {}", c, n))
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        format!("total: {}", stats.total_tickets),
        format!("open: {}", stats.open_tickets),
        format!("avg/day: {:.1}", stats.avg_tickets_per_day),
        format!("priority: {}", priorities),
        format!("category: {}", categories),
    ]
}

pub fn format_classification(classification: &Classification) -> Vec<String> {
    vec![
        format!("category: {}", classification.suggested_category),
        format!("priority: {}", classification.suggested_priority),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::ticket;
    use crate::model::{Category, CategoryBreakdown, Priority, PriorityBreakdown, Status};
    use chrono::{TimeZone, Utc};
    use insta::assert_snapshot;

    #[test]
    fn test_ticket_line() {
        let mut t = ticket("42", "Refund");
        t.category = Category::Billing;
        t.priority = Priority::High;
        t.status = Status::InProgress;
        assert_snapshot!(format_ticket_line(&t), @"#42 [in_progress] billing/high Refund");
    }

    #[test]
    fn test_ticket_detail() {
        let mut t = ticket("7", "Login broken");
        t.description = "Can't log in.\nTried twice.".into();
        t.updated_at = Some(Utc.with_ymd_and_hms(2025, 5, 15, 8, 30, 0).unwrap());
        assert_snapshot!(format_ticket_detail(&t).join("\n"), @r"
        #7 Login broken
        status: Open
        category: General
        priority: Medium
        created: 2025-05-14 10:00
        updated: 2025-05-15 08:30
        description:
          Can't log in.
          Tried twice.
        ");
    }

    #[test]
    fn test_stats() {
        let stats = TicketStats {
            total_tickets: 6,
            open_tickets: 4,
            avg_tickets_per_day: 1.5,
            priority_breakdown: PriorityBreakdown {
                low: 1,
                medium: 2,
                high: 2,
                critical: 1,
            },
            category_breakdown: CategoryBreakdown {
                billing: 3,
                technical: 1,
                account: 0,
                general: 2,
            },
        };
        assert_snapshot!(format_stats(&stats).join("\n"), @r"
        total: 6
        open: 4
        avg/day: 1.5
        priority: low 1, medium 2, high 2, critical 1
        category: billing 3, technical 1, account 0, general 2
        ");
    }

    #[test]
    fn test_classification() {
        let c = Classification {
            suggested_category: Category::Technical,
            suggested_priority: Priority::Critical,
        };
        assert_eq!(
            format_classification(&c),
            vec!["category: technical", "priority: critical"]
        );
    }
}
