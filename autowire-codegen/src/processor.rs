use std::collections::BTreeMap;
use tracing::{debug, info_span};

use crate::{
    classifier::PassContext,
    config::Config,
    diagnostics::{Diagnostics, TracingDiagnostics},
    emitter::{Emitter, SourceUnit},
    errors::ProcessErrorKind,
    injector_spec::InjectorSpecBuilder,
    source::SymbolSource,
    type_model::TypeModel,
    writer::Writer,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The round had no autowired fields
    Unclaimed,
    /// Names of the injectors written in the round, in owner discovery order
    Generated { injectors: Vec<String> },
}

/// Runs generation rounds: symbols of a round are grouped, classified, rendered and only then written,
/// so a failing round writes nothing.
pub struct AutowiredProcessor<W, D = TracingDiagnostics> {
    config: Config,
    emitter: Emitter,
    writer: W,
    diagnostics: D,
    round: usize,
}

impl<W: Writer> AutowiredProcessor<W> {
    #[must_use]
    pub fn new(config: Config, writer: W) -> Self {
        let diagnostics = TracingDiagnostics::new(config.module_name_or_default());
        Self::with_diagnostics(config, writer, diagnostics)
    }
}

impl<W, D> AutowiredProcessor<W, D>
where
    W: Writer,
    D: Diagnostics,
{
    #[must_use]
    pub fn with_diagnostics(config: Config, writer: W, diagnostics: D) -> Self {
        Self {
            emitter: Emitter::new(config.runtime_crate.clone()),
            config,
            writer,
            diagnostics,
            round: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    #[inline]
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Processes the symbols `source` reports for this round.
    ///
    /// # Errors
    /// Returns the first error of the round after reporting it to the diagnostics.
    pub fn process<S, M>(&mut self, source: &mut S, model: &M) -> Result<RoundOutcome, ProcessErrorKind>
    where
        S: SymbolSource + ?Sized,
        M: TypeModel + ?Sized,
    {
        self.round += 1;
        let span = info_span!("round", module = self.config.module_name_or_default(), round = self.round);
        let _guard = span.enter();

        match self.run_round(source, model) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.diagnostics.error(&err.to_string());
                Err(err)
            }
        }
    }

    fn run_round<S, M>(&mut self, source: &mut S, model: &M) -> Result<RoundOutcome, ProcessErrorKind>
    where
        S: SymbolSource + ?Sized,
        M: TypeModel + ?Sized,
    {
        let symbols = source.symbols()?;
        if symbols.is_empty() {
            debug!("No autowired fields");
            return Ok(RoundOutcome::Unclaimed);
        }
        self.diagnostics
            .info(&format!("Found {} autowired fields, start generating injectors", symbols.len()));

        let mut context = PassContext::new();
        context.categorize(symbols)?;

        let builder = InjectorSpecBuilder::new(&self.config.capability, model);
        let specs = context
            .into_groups()
            .into_iter()
            .map(|group| builder.build(group))
            .collect::<Result<Vec<_>, _>>()?;
        let units = specs
            .iter()
            .map(|spec| self.emitter.render(spec))
            .collect::<Result<Vec<SourceUnit>, _>>()?;
        check_collisions(&units)?;

        for unit in &units {
            self.writer.write(unit)?;
            debug!(injector = %unit.name, owner = %unit.owner, "Generated");
        }

        let injectors = units.into_iter().map(|unit| unit.name).collect::<Vec<_>>();
        self.diagnostics
            .info(&format!("Generated {} injectors: {}", injectors.len(), injectors.join(", ")));
        Ok(RoundOutcome::Generated { injectors })
    }
}

/// Units are written by path, two owners mapping to one path would overwrite each other.
fn check_collisions(units: &[SourceUnit]) -> Result<(), ProcessErrorKind> {
    let mut paths = BTreeMap::new();
    for unit in units {
        if let Some(first) = paths.insert(unit.relative_path(), &unit.owner) {
            return Err(ProcessErrorKind::UnitCollision {
                path: unit.relative_path(),
                first: first.clone(),
                second: unit.owner.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{AutowiredProcessor, RoundOutcome};
    use crate::{
        config::Config,
        diagnostics::Diagnostics,
        errors::{ClassifyErrorKind, ProcessErrorKind},
        symbol::{FieldSymbol, Visibility},
        type_model::Capability,
        writer::MemoryWriter,
    };

    use core::cell::RefCell;
    use syn::{parse_quote, Type};
    use tracing_test::traced_test;

    #[derive(Default)]
    struct Recorder {
        infos: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl Diagnostics for Recorder {
        fn info(&self, message: &str) {
            self.infos.borrow_mut().push(message.to_owned());
        }

        fn error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_owned());
        }
    }

    fn no_services(_: &Type, _: &Capability) -> bool {
        false
    }

    fn symbols() -> Vec<FieldSymbol> {
        vec![
            FieldSymbol::new(parse_quote!(name), parse_quote!(Option<String>), parse_quote!(crate::Profile)),
            FieldSymbol::new(parse_quote!(id), parse_quote!(i64), parse_quote!(crate::Order)),
            FieldSymbol::new(parse_quote!(age), parse_quote!(i32), parse_quote!(crate::Profile)),
        ]
    }

    #[test]
    #[traced_test]
    fn test_process() {
        let mut processor = AutowiredProcessor::new(Config::default(), MemoryWriter::new());

        let outcome = processor.process(&mut symbols(), &no_services).unwrap();

        assert_eq!(
            outcome,
            RoundOutcome::Generated {
                injectors: vec!["ProfileAutowired".to_owned(), "OrderAutowired".to_owned()],
            }
        );
        assert_eq!(processor.writer().units().len(), 2);
        assert!(logs_contain("Generated 2 injectors"));
    }

    #[test]
    fn test_unclaimed() {
        let recorder = Recorder::default();
        let mut processor = AutowiredProcessor::with_diagnostics(Config::default(), MemoryWriter::new(), &recorder);

        let outcome = processor.process(&mut Vec::<FieldSymbol>::new(), &no_services).unwrap();

        assert_eq!(outcome, RoundOutcome::Unclaimed);
        assert!(processor.into_writer().units().is_empty());
        assert!(recorder.infos.borrow().is_empty());
    }

    #[test]
    fn test_failure_writes_nothing() {
        let recorder = Recorder::default();
        let mut processor = AutowiredProcessor::with_diagnostics(Config::default(), MemoryWriter::new(), &recorder);

        let mut symbols = symbols();
        symbols.push(FieldSymbol::new(parse_quote!(tags), parse_quote!(Vec<String>), parse_quote!(crate::Order)));

        let err = processor.process(&mut symbols, &no_services).unwrap_err();

        assert!(matches!(
            err,
            ProcessErrorKind::Classify(ClassifyErrorKind::UnsupportedFieldType { ref field, .. }) if field == "tags"
        ));
        assert!(processor.writer().units().is_empty());
        assert_eq!(recorder.errors.borrow().len(), 1);
        assert!(recorder.errors.borrow()[0].contains("tags"));
    }

    #[test]
    fn test_private_field_writes_nothing() {
        let recorder = Recorder::default();
        let mut processor = AutowiredProcessor::with_diagnostics(Config::default(), MemoryWriter::new(), &recorder);

        let mut symbols = symbols();
        symbols.push(
            FieldSymbol::new(parse_quote!(secret), parse_quote!(i32), parse_quote!(crate::Order))
                .with_visibility(Visibility::Private),
        );

        let err = processor.process(&mut symbols, &no_services).unwrap_err();

        assert_eq!(
            err.to_string(),
            "The autowired fields can't be private, please check field [secret] in [crate::Order]"
        );
        assert!(processor.writer().units().is_empty());
    }

    #[test]
    fn test_colliding_units_write_nothing() {
        let recorder = Recorder::default();
        let mut processor = AutowiredProcessor::with_diagnostics(Config::default(), MemoryWriter::new(), &recorder);

        let mut symbols = vec![
            FieldSymbol::new(parse_quote!(url), parse_quote!(Option<String>), parse_quote!(crate::net::HTTPClient)),
            FieldSymbol::new(parse_quote!(url), parse_quote!(Option<String>), parse_quote!(crate::net::HttpClient)),
        ];
        let err = processor.process(&mut symbols, &no_services).unwrap_err();

        assert!(matches!(
            err,
            ProcessErrorKind::UnitCollision { ref path, ref first, ref second }
                if path.as_path() == std::path::Path::new("net/http_client_autowired.rs")
                    && first == "crate::net::HTTPClient"
                    && second == "crate::net::HttpClient"
        ));
        assert!(processor.writer().units().is_empty());
        assert_eq!(recorder.errors.borrow().len(), 1);
    }

    #[test]
    fn test_rounds_do_not_duplicate() {
        let mut processor = AutowiredProcessor::new(Config::default(), MemoryWriter::new());

        let mut source = symbols();
        processor.process(&mut source, &no_services).unwrap();
        let outcome = processor.process(&mut source, &no_services).unwrap();
        assert_eq!(outcome, RoundOutcome::Unclaimed);

        let mut next = vec![FieldSymbol::new(parse_quote!(total), parse_quote!(f64), parse_quote!(crate::Order))];
        processor.process(&mut next, &no_services).unwrap();

        let units = processor.into_writer().into_units();
        assert_eq!(units.len(), 3);
        assert!(!units[2].text.contains("get_long"));
        assert!(units[2].text.contains("get_double"));
    }
}
