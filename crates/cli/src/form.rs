//! Guided terminal form for the sixteen patient attributes
//!
//! One prompt per attribute, in the declared column order. Selectors accept
//! an option number (Enter keeps the default, marked with `*`); numeric
//! inputs enforce their bounds and re-prompt on bad input.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use colored::Colorize;
use obesity_core::PatientRecord;

/// Run the form against stdin.
pub fn collect_record() -> Result<PatientRecord> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    collect_record_from(&mut input)
}

fn collect_record_from(input: &mut impl BufRead) -> Result<PatientRecord> {
    let yes_no = [("yes", "Sim"), ("no", "Não")];
    let frequency = [
        ("no", "Não"),
        ("Sometimes", "Às vezes"),
        ("Frequently", "Frequentemente"),
        ("Always", "Sempre"),
    ];

    Ok(PatientRecord {
        gender: select(
            input,
            "Gênero",
            &[("Male", "Masculino"), ("Female", "Feminino")],
            0,
        )?,
        age: integer_in(input, "Idade (anos)", 14, 100, 25)?,
        height: float_in(input, "Altura (metros)", 1.00, 2.50, 1.70)?,
        weight: float_in(input, "Peso (kg)", 30.0, 200.0, 70.0)?,
        family_history: select(input, "Histórico familiar de sobrepeso?", &yes_no, 0)?,
        favc: select(input, "Consome alimentos de alta caloria?", &yes_no, 0)?,
        fcvc: tier(
            input,
            "Frequência de vegetais por dia",
            &[(1, "raramente"), (2, "às vezes"), (3, "sempre")],
            0,
        )?,
        ncp: tier(
            input,
            "Número de refeições principais",
            &[
                (1, "1 refeição"),
                (2, "2 refeições"),
                (3, "3 refeições"),
                (4, "4 refeições"),
            ],
            0,
        )?,
        caec: select(input, "Consome alimentos entre as refeições?", &frequency, 0)?,
        smoke: select(input, "Fuma?", &yes_no, 0)?,
        ch2o: tier(
            input,
            "Consumo diário de água",
            &[(1, "< 1 litro"), (2, "1 a 2 litros"), (3, "> 2 litros")],
            0,
        )?,
        scc: select(input, "Monitora ingestão calórica?", &yes_no, 0)?,
        faf: tier(
            input,
            "Atividade física (dias por semana)",
            &[
                (0, "nenhuma"),
                (1, "1 a 2 dias"),
                (2, "3 a 4 dias"),
                (3, "5 ou mais dias"),
            ],
            0,
        )?,
        tue: tier(
            input,
            "Tempo de telas",
            &[(0, "0 a 2h/dia"), (1, "3 a 5h/dia"), (2, "> 5h/dia")],
            0,
        )?,
        calc: select(
            input,
            "Consumo de álcool",
            &[
                ("no", "Não bebe"),
                ("Sometimes", "Às vezes"),
                ("Frequently", "Frequentemente"),
                ("Always", "Sempre"),
            ],
            0,
        )?,
        mtrans: select(
            input,
            "Meio de transporte principal",
            &[
                ("Automobile", "Carro"),
                ("Motorbike", "Moto"),
                ("Bike", "Bicicleta"),
                ("Public_Transportation", "Transporte público"),
                ("Walking", "A pé"),
            ],
            0,
        )?,
    })
}

fn read_answer(input: &mut impl BufRead) -> Result<String> {
    print!("> ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("entrada encerrada antes do fim do formulário");
    }
    Ok(line.trim().to_string())
}

/// Numbered selector over categorical options; returns the wire value.
fn select(
    input: &mut impl BufRead,
    label: &str,
    options: &[(&str, &str)],
    default: usize,
) -> Result<String> {
    println!("{}", label.bold());
    for (idx, (_, display)) in options.iter().enumerate() {
        let marker = if idx == default { "*" } else { " " };
        println!("  {} {}) {}", marker, idx + 1, display);
    }

    loop {
        let answer = read_answer(input)?;
        if answer.is_empty() {
            return Ok(options[default].0.to_string());
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(options[n - 1].0.to_string()),
            _ => println!(
                "{}",
                format!("Escolha um número entre 1 e {}.", options.len()).yellow()
            ),
        }
    }
}

/// Numbered selector over numeric tiers; returns the tier value.
fn tier(
    input: &mut impl BufRead,
    label: &str,
    options: &[(u32, &str)],
    default: usize,
) -> Result<u32> {
    println!("{}", label.bold());
    for (idx, (value, display)) in options.iter().enumerate() {
        let marker = if idx == default { "*" } else { " " };
        println!("  {} {}) {} - {}", marker, idx + 1, value, display);
    }

    loop {
        let answer = read_answer(input)?;
        if answer.is_empty() {
            return Ok(options[default].0);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(options[n - 1].0),
            _ => println!(
                "{}",
                format!("Escolha um número entre 1 e {}.", options.len()).yellow()
            ),
        }
    }
}

/// Bounded integer input.
fn integer_in(
    input: &mut impl BufRead,
    label: &str,
    min: u32,
    max: u32,
    default: u32,
) -> Result<u32> {
    println!("{} [{}-{}, padrão {}]", label.bold(), min, max, default);

    loop {
        let answer = read_answer(input)?;
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<u32>() {
            Ok(n) if (min..=max).contains(&n) => return Ok(n),
            _ => println!(
                "{}",
                format!("Informe um número inteiro entre {min} e {max}.").yellow()
            ),
        }
    }
}

/// Bounded float input.
fn float_in(
    input: &mut impl BufRead,
    label: &str,
    min: f64,
    max: f64,
    default: f64,
) -> Result<f64> {
    println!("{} [{:.2}-{:.2}, padrão {:.2}]", label.bold(), min, max, default);

    loop {
        let answer = read_answer(input)?;
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<f64>() {
            Ok(n) if n >= min && n <= max => return Ok(n),
            _ => println!(
                "{}",
                format!("Informe um número entre {min:.2} e {max:.2}.").yellow()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_all_defaults() {
        let mut input = Cursor::new("\n".repeat(16).into_bytes());
        let record = collect_record_from(&mut input).unwrap();

        assert_eq!(record.gender, "Male");
        assert_eq!(record.age, 25);
        assert!((record.height - 1.70).abs() < f64::EPSILON);
        assert!((record.weight - 70.0).abs() < f64::EPSILON);
        assert_eq!(record.fcvc, 1);
        assert_eq!(record.ncp, 1);
        assert_eq!(record.caec, "no");
        assert_eq!(record.faf, 0);
        assert_eq!(record.tue, 0);
        assert_eq!(record.mtrans, "Automobile");
    }

    #[test]
    fn test_explicit_answers() {
        // Gender 2 -> Female; age 21; height 1.62; weight 64; CAEC 2 -> Sometimes;
        // FAF 2 -> tier 1; MTRANS 4 -> Public_Transportation.
        let answers = "2\n21\n1.62\n64\n1\n1\n2\n3\n2\n2\n2\n2\n2\n2\n2\n4\n";
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let record = collect_record_from(&mut input).unwrap();

        assert_eq!(record.gender, "Female");
        assert_eq!(record.age, 21);
        assert!((record.height - 1.62).abs() < f64::EPSILON);
        assert!((record.weight - 64.0).abs() < f64::EPSILON);
        assert_eq!(record.fcvc, 2);
        assert_eq!(record.ncp, 3);
        assert_eq!(record.caec, "Sometimes");
        assert_eq!(record.smoke, "no");
        assert_eq!(record.faf, 1);
        assert_eq!(record.calc, "Sometimes");
        assert_eq!(record.mtrans, "Public_Transportation");
    }

    #[test]
    fn test_out_of_range_input_reprompts() {
        // Age 200 is out of range, then 30 is accepted.
        let mut input = Cursor::new(b"200\n30\n".to_vec());
        let age = integer_in(&mut input, "Idade", 14, 100, 25).unwrap();
        assert_eq!(age, 30);
    }

    #[test]
    fn test_bad_selector_input_reprompts() {
        let mut input = Cursor::new(b"9\nabc\n2\n".to_vec());
        let value = select(&mut input, "Opção", &[("a", "A"), ("b", "B")], 0).unwrap();
        assert_eq!(value, "b");
    }

    #[test]
    fn test_eof_is_an_error() {
        let mut input = Cursor::new(Vec::new());
        assert!(collect_record_from(&mut input).is_err());
    }
}
