//! Converting a loosely typed webhook payload into validated data
//!
//! Shows path queries, object shapes, tagged unions, and the issue report a
//! mismatched payload produces.

use reshape::prelude::*;
use serde_json::Value;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let payload = json!({
        "order": {
            "id": 90421,
            "total": 149.5,
            "customer": {"name": "Ada Lovelace", "vip": true},
            "lines": [
                {"sku": "KB-87", "qty": 2, "price": 45.0},
                {"sku": "MS-3", "qty": 1, "price": 59.5}
            ]
        },
        "payment": {"kind": "card", "last4": "4242"}
    });

    // Example 1: point queries with path expressions
    println!("=== Example 1: Path Queries ===\n");
    println!("customer:     {}", path("$.order.customer.name")?.convert(payload.clone())?);
    println!("skus:         {}", path("$.order.lines[*].sku")?.convert(payload.clone())?);
    println!("first prices: {}", path("$.order.lines[:2].price")?.convert(payload.clone())?);
    println!("quantities:   {}\n", path("$..qty")?.convert(payload.clone())?);

    // Example 2: a declarative shape pulling from nested positions
    println!("=== Example 2: Shape Conversion ===\n");
    let line = strict()
        .field("sku", string())
        .field("qty", number())
        .field("price", number());
    let order = strict()
        .field("id", path("$.order.id")?.pipe(number()))
        .field("customer", path("$.order.customer.name")?.pipe(string()))
        .field("lines", path("$.order.lines")?.pipe(array(line)))
        .field("coupon", path("$.order.coupon")?.pipe(string().optional()));

    match order.try_convert(payload.clone()) {
        Conversion::Converted(converted) => println!("order: {}\n", Value::Object(converted)),
        Conversion::Failed(issues) => println!("rejected: {issues}\n"),
    }

    // Example 3: routing on a tag field
    println!("=== Example 3: Tagged Union ===\n");
    let payment = union("kind")
        .variant("card", strict().field("last4", string()))
        .variant("wire", strict().field("iban", string()));
    println!("payment: {}\n", path("$.payment")?.pipe(payment).convert(payload)?);

    // Example 4: every mismatch in one report
    println!("=== Example 4: Issue Report ===\n");
    let broken = json!({
        "order": {
            "id": "oops",
            "customer": {},
            "lines": [{"sku": 7, "qty": 1, "price": 3.0}]
        }
    });
    if let Err(issues) = order.convert(broken) {
        for issue in issues.iter() {
            println!("  {issue}");
        }
    }

    Ok(())
}
