use super::*;

mod cpu_line_tests {
    use super::*;

    #[test]
    fn aggregate_line() {
        let line = "cpu 10132153 290696 3084719 46828483 16683 0 25195 0 175628 0"
            .parse::<CpuLine>()
            .unwrap();
        let CpuTicks { active, total } = line.time.ticks();
        assert_eq!(total - active, UserHz::new(46828483 + 16683));
    }

    #[test]
    fn single_cpu_is_not_the_aggregate() {
        let err = "cpu0 1393280 32966 572056 13343292 6130 0 17875 0 23933 0"
            .parse::<CpuLine>()
            .unwrap_err();
        assert_eq!(
            err,
            StatParseError::NotAggregate {
                kind: "cpu0".to_owned()
            }
        );
    }

    #[test]
    fn padding_and_newlines() {
        "cpu  1 2 3 4 5 6 7 8 9 10\n".parse::<CpuLine>().unwrap();
    }

    #[test]
    fn empty() {
        assert_eq!("".parse::<CpuLine>(), Err(StatParseError::Empty));
        assert_eq!("   ".parse::<CpuLine>(), Err(StatParseError::Empty));
    }

    #[test]
    fn not_a_cpu_line() {
        let err = "intr 1462898".parse::<CpuLine>().unwrap_err();
        match err {
            StatParseError::NotAggregate { kind } if kind == "intr" => {}
            _other => panic!(),
        }
    }

    /// older kernels do not report guest time.
    #[test]
    fn without_guest_time() {
        let line = "cpu 10132153 290696 3084719 46828483 16683 0 25195 0"
            .parse::<CpuLine>()
            .unwrap();
        let active = UserHz::new(10132153 + 290696 + 3084719 + 25195);
        assert_eq!(line.time.ticks().active, active);
    }

    #[test]
    fn field_count() {
        let short = "cpu 10132153 290696 3084719 46828483 16683 0 25195";
        let long = "cpu 10132153 290696 3084719 46828483 16683 0 25195 0 175628 0 0";
        assert_eq!(
            short.parse::<CpuLine>(),
            Err(StatParseError::CpuTime { fields: 7 })
        );
        assert_eq!(
            long.parse::<CpuLine>(),
            Err(StatParseError::CpuTime { fields: 11 })
        );
    }

    #[test]
    fn big() {
        let line = "cpu  5000000000 5000000000 5000000000 5000000000 5000000000 5000000000 5000000000 0 0 0"
            .parse::<CpuLine>()
            .unwrap();
        assert_eq!(line.time.ticks().total, UserHz::new(35_000_000_000));
    }
}

mod aggregate_tests {
    use super::*;

    const STAT: &str = "\
cpu  100 20 30 400 50 6 7 8 9 10
cpu0 50 10 15 200 25 3 3 4 4 5
cpu1 50 10 15 200 25 3 4 4 5 5
intr 1462898
ctxt 1990473
btime 769041601
processes 86031
procs_running 6
procs_blocked 2
";

    /// active counts user, nice, system, irq, softirq, and steal. total adds idle and iowait.
    #[test]
    fn ticks() {
        let CpuTicks { active, total } = aggregate(STAT).unwrap();
        assert_eq!(active, UserHz::new(100 + 20 + 30 + 6 + 7 + 8));
        assert_eq!(total, UserHz::new(171 + 400 + 50));
    }

    #[test]
    fn aggregate_need_not_be_first() {
        let stat = "intr 1\ncpu 1 1 1 1 1 1 1 1 0 0\n";
        let CpuTicks { active, total } = aggregate(stat).unwrap();
        assert_eq!(active, UserHz::new(6));
        assert_eq!(total, UserHz::new(8));
    }

    #[test]
    fn missing() {
        assert_eq!(
            aggregate("cpu0 1 1 1 1 1 1 1 1 0 0\n"),
            Err(StatParseError::MissingAggregate)
        );
        assert_eq!(aggregate(""), Err(StatParseError::MissingAggregate));
    }

    #[test]
    fn malformed() {
        assert!(matches!(
            aggregate("cpu 1 two 3 4 5 6 7 8\n"),
            Err(StatParseError::UserHzParse(_))
        ));
    }
}
