//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use langswitch::core::format_output_path;

    #[test]
    fn as_is() {
        let final_destination =
            format_output_path("/home/username/Downloads/website.html", Some(""), "es");

        assert_eq!(final_destination, "/home/username/Downloads/website.html");
    }

    #[test]
    fn substitute_title() {
        let final_destination = format_output_path(
            "/home/username/Downloads/%title%.html",
            Some("Document Title"),
            "es",
        );

        assert_eq!(
            final_destination,
            "/home/username/Downloads/Document Title.html"
        );
    }

    #[test]
    fn substitute_title_multi() {
        let final_destination = format_output_path(
            "/home/username/Downloads/%title%/%title%.html",
            Some("Document Title"),
            "es",
        );

        assert_eq!(
            final_destination,
            "/home/username/Downloads/Document Title/Document Title.html"
        );
    }

    #[test]
    fn substitute_lang() {
        let final_destination =
            format_output_path("site/%lang%/%title%.%lang%.html", Some("Inicio"), "pt-BR");

        assert_eq!(final_destination, "site/pt-BR/Inicio.pt-BR.html");
    }

    #[test]
    fn missing_title() {
        let final_destination = format_output_path("%title%index.html", None, "es");

        assert_eq!(final_destination, "index.html");
    }

    #[test]
    fn sanitize() {
        let final_destination = format_output_path(
            r#"/home/username/Downloads/<>:"|?/%title%.html"#,
            Some(r#"/\<>:"|?"#),
            "es",
        );

        assert_eq!(
            final_destination,
            r#"/home/username/Downloads/<>:"|?/__[] - -.html"#
        );
    }

    #[test]
    fn level_up() {
        let final_destination = format_output_path("../%title%.html", Some(".Title"), "es");

        assert_eq!(final_destination, r#"../Title.html"#);
    }
}
