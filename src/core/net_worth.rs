use super::types::{GoalError, LineItem, NetWorthInputs, NetWorthSummary, ensure_amount};

const UNCATEGORIZED: &str = "Uncategorized";

pub fn summarize_net_worth(inputs: &NetWorthInputs) -> Result<NetWorthSummary, GoalError> {
    let asset_categories = subtotal_by_category("assets", &inputs.assets)?;
    let liability_categories = subtotal_by_category("liabilities", &inputs.liabilities)?;

    let total_assets: f64 = asset_categories.iter().map(|item| item.amount).sum();
    let total_liabilities: f64 = liability_categories.iter().map(|item| item.amount).sum();
    let debt_to_asset_ratio = if total_assets > 0.0 {
        Some(total_liabilities / total_assets)
    } else {
        None
    };

    Ok(NetWorthSummary {
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
        debt_to_asset_ratio,
        asset_categories,
        liability_categories,
    })
}

// Subtotals keep the order in which categories first appear.
fn subtotal_by_category(
    field: &'static str,
    items: &[LineItem],
) -> Result<Vec<LineItem>, GoalError> {
    let mut subtotals: Vec<LineItem> = Vec::new();
    for item in items {
        ensure_amount(field, item.amount)?;
        let category = match item.category.trim() {
            "" => UNCATEGORIZED,
            name => name,
        };
        match subtotals.iter_mut().find(|s| s.category == category) {
            Some(existing) => existing.amount += item.amount,
            None => subtotals.push(LineItem {
                category: category.to_string(),
                amount: item.amount,
            }),
        }
    }
    Ok(subtotals)
}
