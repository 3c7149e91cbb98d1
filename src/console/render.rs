use crate::form::binder::CustomerForm;
use crate::models::customer::Customer;

const HEADERS: [&str; 10] = [
    "ID", "UserName", "Password", "FirstName", "LastName", "Address", "Phone", "Email", "Active",
    "Promo",
];

/// Render search results as a table, one row per customer in the order given
pub fn render_results(customers: &[Customer]) -> String {
    let rows: Vec<[String; 10]> = customers.iter().map(row).collect();

    let mut widths = HEADERS.map(str::len);
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    push_line(&mut out, &widths.map(|w| "-".repeat(w)), &widths);
    for cells in &rows {
        push_line(&mut out, cells, &widths);
    }
    out
}

/// Render the bound form as `field: value` lines
pub fn render_form(form: &CustomerForm) -> String {
    let mut out = String::new();
    for (field, value) in form.iter() {
        out.push_str(&format!("{:>10}: {}\n", field.name(), value));
    }
    out
}

fn row(customer: &Customer) -> [String; 10] {
    [
        customer.id.map(|id| id.to_string()).unwrap_or_default(),
        customer.username.clone(),
        customer.password.clone(),
        customer.firstname.clone(),
        customer.lastname.clone(),
        customer.address.clone(),
        customer.phone.clone(),
        customer.email.clone(),
        customer.active.to_string(),
        customer.promo.to_string(),
    ]
}

fn push_line(out: &mut String, cells: &[String; 10], widths: &[usize; 10]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}
