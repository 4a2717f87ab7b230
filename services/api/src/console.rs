use crate::infra::{advisor_service, credit_service, parse_employment};
use clap::Args;
use credit_advisor::advisor::AdvisorReply;
use credit_advisor::config::AppConfig;
use credit_advisor::credit::{
    ClientProfile, EmploymentType, EvaluationReceipt, EvaluationRequest, HistoryEntry,
};
use credit_advisor::error::AppError;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Client name as listed in the directory
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Client DNI (manual entry)
    #[arg(long, required_unless_present = "name")]
    pub(crate) dni: Option<String>,
    /// Client full name (manual entry)
    #[arg(long, required_unless_present = "name")]
    pub(crate) nombre: Option<String>,
    /// Monthly income (manual entry)
    #[arg(long, required_unless_present = "name")]
    pub(crate) income: Option<Decimal>,
    /// Score SBS (manual entry)
    #[arg(long, required_unless_present = "name")]
    pub(crate) score: Option<u16>,
    /// Debt ratio in percent (manual entry)
    #[arg(long, required_unless_present = "name")]
    pub(crate) debt_ratio: Option<Decimal>,
    /// Employment type: Dependiente or Independiente
    #[arg(long, value_parser = parse_employment, default_value = "Dependiente")]
    pub(crate) employment: EmploymentType,
    /// Requested loan amount
    #[arg(long)]
    pub(crate) amount: Decimal,
    /// Term in months (12, 24, 36, 48 or 60)
    #[arg(long, default_value_t = 12)]
    pub(crate) term: u16,
}

impl EvaluateArgs {
    fn into_request(self) -> EvaluationRequest {
        let client = match (self.dni, self.nombre, self.income, self.score, self.debt_ratio) {
            (Some(dni), Some(name), Some(monthly_income), Some(credit_score), Some(debt_ratio)) => {
                Some(ClientProfile {
                    dni,
                    name,
                    monthly_income,
                    credit_score,
                    debt_ratio,
                })
            }
            _ => None,
        };

        EvaluationRequest {
            client_name: self.name,
            client,
            employment: self.employment,
            requested_amount: self.amount,
            term_months: self.term,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ClientsArgs {
    /// Case-insensitive fragment of the client name
    #[arg(long)]
    pub(crate) query: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct HistoryArgs {
    /// Number of recent evaluations to show
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
}

#[derive(Args, Debug)]
pub(crate) struct AskArgs {
    /// Question forwarded verbatim to the advisor
    pub(crate) question: String,
}

pub(crate) fn run_evaluate(config: &AppConfig, args: EvaluateArgs) -> Result<(), AppError> {
    let service = credit_service(&config.storage);
    let receipt = service.evaluate(args.into_request())?;
    print!("{}", render_evaluation(&receipt));
    Ok(())
}

pub(crate) fn run_clients(config: &AppConfig, args: ClientsArgs) -> Result<(), AppError> {
    let service = credit_service(&config.storage);
    let directory = service.directory()?;
    let names = directory.search(args.query.as_deref().unwrap_or_default());

    if names.is_empty() {
        println!("No clients match");
        return Ok(());
    }

    println!("Clients ({})", names.len());
    for name in names {
        println!("- {name}");
    }
    Ok(())
}

pub(crate) fn run_history(config: &AppConfig, args: HistoryArgs) -> Result<(), AppError> {
    let service = credit_service(&config.storage);
    let entries = service.history(args.limit)?;
    print!("{}", render_history(&entries));
    Ok(())
}

pub(crate) async fn run_ask(config: &AppConfig, args: AskArgs) -> Result<(), AppError> {
    let advisor = advisor_service(&config.advisor)?;

    match advisor.ask(&args.question).await {
        Some(AdvisorReply::Answer(answer)) => println!("Asistente:\n\n{answer}"),
        Some(AdvisorReply::Unavailable(message)) => println!("{message}"),
        None => println!("Escribe una pregunta para el asesor."),
    }
    Ok(())
}

pub(crate) fn render_evaluation(receipt: &EvaluationReceipt) -> String {
    let result = &receipt.result;
    let mut out = String::new();

    out.push_str("Resultado de Evaluación\n");
    out.push_str(&format!(
        "Cliente: {} (DNI {})\n",
        receipt.application.client.name, receipt.application.client.dni
    ));
    out.push_str(&format!("Evaluación: {}\n", result.decision.label()));
    out.push_str(&format!("Cuota mensual estimada: {}\n", result.installment));
    out.push_str(&format!(
        "Relación cuota/ingreso: {}%\n",
        result.installment_ratio
    ));

    if !result.reasons.is_empty() {
        out.push_str("Motivos:\n");
        for reason in result.justification() {
            out.push_str(&format!("- {reason}\n"));
        }
    }

    if let Some(amount) = result.suggested_amount {
        out.push_str(&format!(
            "Podrías aplicar a un monto aproximado de: S/ {amount}\n"
        ));
    }

    if !receipt.persisted {
        out.push_str("(la evaluación no pudo registrarse en el historial)\n");
    }

    out
}

pub(crate) fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "Evaluation history: none\n".to_string();
    }

    let mut out = format!("Evaluation history ({} entries)\n", entries.len());
    for entry in entries {
        out.push_str(&format!(
            "- {} | {} | S/ {} x {} meses | cuota {} ({}%) | {}\n",
            entry.dni,
            entry.name,
            entry.requested_amount,
            entry.term_months,
            entry.installment,
            entry.installment_ratio,
            entry.decision.label()
        ));
    }
    out
}
