//! Plain-text rendering of the monthly report for the terminal.

use std::fmt::{self, Write};

use engine::{MonthlyReport, ReportCell, Transaction};

const LABEL_WIDTH: usize = 48;
const VALUE_WIDTH: usize = 14;

fn cell(cell: &ReportCell) -> String {
    let mut label = format!("{}. {}", cell.id, cell.label);
    if label.chars().count() > LABEL_WIDTH {
        label = label.chars().take(LABEL_WIDTH - 1).collect::<String>() + "…";
    }
    let value = if cell.show_value {
        cell.value.format_plain()
    } else {
        String::new()
    };
    let marker = if cell.emphasized { '*' } else { ' ' };
    format!("{marker}{label:<LABEL_WIDTH$} {value:>VALUE_WIDTH$}")
}

pub fn report(report: &MonthlyReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let header = &report.header;
    let dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());

    writeln!(out, "MAPA DO MOVIMENTO MENSAL PARA CONFERÊNCIAS")?;
    writeln!(
        out,
        "Conferência: {}   Mês: {:02} {}   Ano: {}",
        header.conference_name.to_uppercase(),
        report.period.month(),
        report.period.month_name(),
        report.period.year()
    )?;
    writeln!(out, "Código da conferência: {}", dash(&header.conference_code))?;
    writeln!(
        out,
        "Conselho Particular: {}   Central: {}   Metropolitano: {}",
        dash(&header.particular_council),
        dash(&header.central_council),
        dash(&header.metropolitan_council)
    )?;
    writeln!(out)?;

    for row in report.rows() {
        writeln!(out, "{} | {}", cell(&row.receipts), cell(&row.payments))?;
    }

    let supplement = &report.supplement;
    let counts = &supplement.headcounts;
    writeln!(out)?;
    writeln!(
        out,
        "Alimentos doados: {} kg   Obras especiais: {}   Pessoas atendidas (O.E.): {}",
        supplement.food_kg, supplement.special_works_count, supplement.people_attended_special_works
    )?;
    writeln!(
        out,
        "Despesas do mês com O.E.: {}   Construção/Reforma: {}",
        supplement.special_works_expenses, supplement.construction_reform
    )?;
    writeln!(
        out,
        "Membros ativos: {} (confrades {}, consócias {}, aspirantes {}, auxiliares {})",
        counts.active_members, counts.confrades, counts.consocias, counts.aspirantes, counts.auxiliares
    )?;
    writeln!(
        out,
        "Famílias assistidas: {}   Pessoas assistidas: {}",
        counts.families_assisted, counts.people_assisted
    )?;
    Ok(out)
}

pub fn transactions(transactions: &[Transaction]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for tx in transactions {
        let amount = engine::MoneyCents::try_from_f64(tx.value)
            .map(|v| v.format_plain())
            .unwrap_or_else(|| tx.value.to_string());
        writeln!(
            out,
            "{}  {}  {:>2}  {:<7}  {:>14}  {}",
            tx.id, tx.occurred_on, tx.category_id, tx.kind, amount, tx.description
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use engine::{
        MapInputs, MonthlyReport, Period, ReportHeader, ReportSupplement, compute_monthly_map,
    };

    use super::*;

    #[test]
    fn table_has_header_and_fifteen_rows() {
        let period = Period::new(3, 2026).unwrap();
        let lines = compute_monthly_map(&MapInputs {
            conference_id: "c1".to_string(),
            period,
            transactions: Vec::new(),
            opening_balance: 1000.0,
        })
        .unwrap();
        let header = ReportHeader {
            conference_name: "São Vicente".to_string(),
            ..Default::default()
        };
        let report =
            MonthlyReport::new(header, period, lines, ReportSupplement::default()).unwrap();

        let text = super::report(&report).unwrap();
        assert!(text.contains("SÃO VICENTE"));
        assert!(text.contains("Março"));
        assert_eq!(text.lines().filter(|l| l.contains(" | ")).count(), 15);
        assert!(text.contains("1.000,00"));
    }

    #[test]
    fn transaction_list_has_one_line_per_entry() {
        let tx = Transaction {
            id: uuid::Uuid::nil(),
            conference_id: "c1".to_string(),
            occurred_on: chrono::NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            kind: engine::TransactionKind::Income,
            category_id: 1,
            description: "Coleta".to_string(),
            value: 1234.5,
        };
        let text = transactions(&[tx.clone(), tx]).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("1.234,50"));
        assert!(text.contains("income "));
    }
}
