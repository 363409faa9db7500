//! Terminal output. Records go to stdout as pretty JSON; lists get one
//! line per row.

use serde::Serialize;
use voyage_core::models::{Destination, Hotel, OrdersPage, Pack, Reservation};
use voyage_core::types::DbId;

pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn id_cell(id: Option<DbId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".into())
}

pub fn hotels(hotels: &[Hotel]) {
    if hotels.is_empty() {
        println!("No hotels found.");
        return;
    }
    for hotel in hotels {
        println!(
            "{:>6}  {:<32} {}",
            id_cell(hotel.id),
            hotel.name,
            hotel.city.as_deref().unwrap_or_default()
        );
    }
}

pub fn destinations(destinations: &[Destination]) {
    if destinations.is_empty() {
        println!("No destinations found.");
        return;
    }
    for d in destinations {
        println!(
            "{:>6}  {:<32} {:<16} {:>10.2}",
            id_cell(d.id),
            d.name,
            d.country,
            d.price
        );
    }
}

pub fn packs(packs: &[Pack]) {
    if packs.is_empty() {
        println!("No packs found.");
        return;
    }
    for pack in packs {
        println!(
            "{:>6}  {:<32} {:<16} {:>10.2}",
            id_cell(pack.id),
            pack.name,
            pack.country,
            pack.price
        );
    }
}

pub fn reservations(reservations: &[Reservation]) {
    if reservations.is_empty() {
        println!("No reservations found.");
        return;
    }
    for r in reservations {
        let stay = match (r.check_in, r.check_out) {
            (Some(from), Some(to)) => format!("{from} to {to}"),
            _ => "-".into(),
        };
        println!(
            "{:>6}  {:<24} {:<24} {:<26} {:>10.2}",
            r.id,
            r.user_name.as_deref().unwrap_or_default(),
            r.hotel_name.as_deref().unwrap_or_default(),
            stay,
            r.total_amount.unwrap_or_default()
        );
    }
}

pub fn orders(page: &OrdersPage) {
    for row in &page.items {
        println!(
            "{:<32} {:<12} {:>10.2}  {:<10} {}",
            row.name, row.category, row.amount, row.status, row.created_at
        );
    }
    println!(
        "Page {} of {} ({} orders)",
        page.page + 1,
        page.page_count().max(1),
        page.total
    );
}
